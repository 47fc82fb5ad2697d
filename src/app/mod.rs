use crate::adapters::{PgConnector, S3ObjectStore, SnsPublisher};
use crate::config::AppConfig;
use crate::core::etl::ExportJob;
use crate::core::RunReport;
use aws_config::BehaviorVersion;

pub type AwsExportJob = ExportJob<PgConnector, S3ObjectStore, SnsPublisher>;

/// Wires the PostgreSQL, S3 and SNS adapters. Region and credentials come from the default AWS chain.
pub async fn build_job(config: AppConfig) -> AwsExportJob {
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    tracing::debug!("AWS region: {:?}", sdk_config.region());

    let s3 = S3ObjectStore::new(aws_sdk_s3::Client::new(&sdk_config));
    let sns = SnsPublisher::new(aws_sdk_sns::Client::new(&sdk_config));

    ExportJob::new(config, PgConnector::default(), s3, sns)
}

pub async fn run_export(config: AppConfig) -> RunReport {
    build_job(config).await.run().await
}
