use crate::config::AppConfig;
use crate::core::extractor::Extractor;
use crate::core::notifier::{MessageTemplate, Notifier};
use crate::core::pipeline::PipelineState;
use crate::core::uploader::Uploader;
use crate::core::{DatabaseConnector, MessagePublisher, ObjectStore, Outcome, RunReport, Stage};
use crate::utils::error::PipelineError;
use chrono::Utc;

/// Drives extract, upload and notify for one dataset until the run reaches `Done`.
pub struct ExportJob<D: DatabaseConnector, O: ObjectStore, P: MessagePublisher> {
    config: AppConfig,
    extractor: Extractor<D>,
    uploader: Uploader<O>,
    notifier: Notifier<P>,
}

impl<D: DatabaseConnector, O: ObjectStore, P: MessagePublisher> ExportJob<D, O, P> {
    pub fn new(config: AppConfig, connector: D, store: O, publisher: P) -> Self {
        let template = MessageTemplate {
            dataset_name: config.dataset.name.clone(),
            source_database: config.connection.dbname.clone(),
            bucket: config.s3_bucket_name.clone(),
            support_email: config.support_email.clone(),
        };

        Self {
            extractor: Extractor::new(connector, config.dataset.source_table.clone()),
            uploader: Uploader::new(store),
            notifier: Notifier::new(publisher, template),
            config,
        }
    }

    /// Runs the job once. Stage errors are recorded in the report; nothing is propagated.
    pub async fn run(&self) -> RunReport {
        let started_at = Utc::now();
        let dataset = &self.config.dataset;

        tracing::info!(
            "Starting export of {} ({} -> s3://{}/{})",
            dataset.name,
            dataset.source_table,
            self.config.s3_bucket_name,
            dataset.destination_key
        );

        let mut state = PipelineState::Start;
        let mut failure: Option<(Stage, PipelineError)> = None;
        let mut rows_extracted = None;
        let mut outcome = Outcome::Failed;
        let mut notification_delivered = false;

        while !state.is_terminal() {
            let succeeded = match state {
                PipelineState::Start => {
                    match self
                        .extractor
                        .extract(&dataset.local_file_path, &self.config.connection)
                        .await
                    {
                        Ok(summary) => {
                            rows_extracted = Some(summary.rows);
                            true
                        }
                        Err(e) => {
                            log_stage_failure(Stage::Extract, &e);
                            failure = Some((Stage::Extract, e));
                            false
                        }
                    }
                }
                PipelineState::Extracted => {
                    match self
                        .uploader
                        .upload(
                            &dataset.local_file_path,
                            &self.config.s3_bucket_name,
                            &dataset.destination_key,
                        )
                        .await
                    {
                        Ok(_) => true,
                        Err(e) => {
                            log_stage_failure(Stage::Upload, &e);
                            failure = Some((Stage::Upload, e));
                            false
                        }
                    }
                }
                PipelineState::Uploaded => {
                    outcome = Outcome::Succeeded;
                    notification_delivered = self.send(Outcome::Succeeded).await;
                    notification_delivered
                }
                PipelineState::Failed => {
                    outcome = Outcome::Failed;
                    notification_delivered = self.send(Outcome::Failed).await;
                    notification_delivered
                }
                PipelineState::Done => true,
            };

            let next = state.transition(succeeded);
            tracing::debug!("Pipeline state {:?} -> {:?}", state, next);
            state = next;
        }

        let report = RunReport {
            dataset: dataset.name.clone(),
            outcome,
            failed_stage: failure.as_ref().map(|(stage, _)| *stage),
            failure_cause: failure.as_ref().map(|(_, e)| e.to_string()),
            rows_extracted,
            notification_delivered,
            started_at,
            finished_at: Utc::now(),
        };

        match serde_json::to_string(&report) {
            Ok(json) => tracing::info!("Run finished: {}", json),
            Err(e) => tracing::warn!("Run finished ({:?}); report not serializable: {}", outcome, e),
        }
        report
    }

    async fn send(&self, outcome: Outcome) -> bool {
        match self.notifier.notify(&self.config.topic_arn, outcome).await {
            Ok(_) => true,
            Err(_) => {
                tracing::warn!("{:?} notification was not delivered; not retrying", outcome);
                false
            }
        }
    }
}

fn log_stage_failure(stage: Stage, e: &PipelineError) {
    tracing::error!(
        "{:?} stage failed: {} (Category: {:?})",
        stage,
        e,
        e.category()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
}
