#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use table_export::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use table_export::{run_export, AppConfig, RunReport};

/// Scheduled invocations (e.g. an EventBridge rule) carry no parameters we use; configuration
/// comes from the function environment. `LOCAL_FILE_PATH` must point under `/tmp` there.
#[cfg(feature = "lambda")]
async fn function_handler(_event: LambdaEvent<serde_json::Value>) -> Result<RunReport, Error> {
    let config = AppConfig::from_env()?;
    config.validate()?;

    tracing::info!("Starting table-export Lambda invocation");
    let report = run_export(config).await;
    tracing::info!("table-export Lambda invocation finished: {:?}", report.outcome);
    Ok(report)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_json_logger();

    run(service_fn(function_handler)).await
}
