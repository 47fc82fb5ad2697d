use anyhow::Context;
use table_export::utils::{logger, validation::Validate};
use table_export::{run_export, AppConfig, Outcome};

// One logical thread: every stage is awaited in turn and nothing is spawned.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let loaded = AppConfig::from_env().and_then(|config| config.validate().map(|_| config));

    let format = loaded
        .as_ref()
        .map(|config| config.log_format)
        .unwrap_or_default();
    logger::init_logger(format);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            return Err(e).context("export not started");
        }
    };

    tracing::info!("Starting table-export");
    tracing::debug!("Config: {:?}", config);

    let report = run_export(config).await;

    match report.outcome {
        Outcome::Succeeded => tracing::info!("✅ Export completed successfully"),
        Outcome::Failed => tracing::warn!(
            "❌ Export failed at {:?}; failure notification delivered: {}",
            report.failed_stage,
            report.notification_delivered
        ),
    }

    Ok(())
}
