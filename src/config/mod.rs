use crate::domain::model::{
    ConnectionProfile, DatasetDescriptor, DEFAULT_LOCAL_FILE_PATH, DEFAULT_PG_PORT,
};
use crate::utils::error::{PipelineError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use std::env;

pub const DEFAULT_SUPPORT_EMAIL: &str = "tech-support@companyx.com";

/// Process configuration, read once at startup and passed to every stage.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset: DatasetDescriptor,
    pub connection: ConnectionProfile,
    pub s3_bucket_name: String,
    pub topic_arn: String,
    pub support_email: String,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads the process environment, seeded from `./.env` when that file exists.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(PipelineError::ConfigError {
                    message: format!("Failed to read .env file: {}", e),
                })
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| -> Result<String> {
            validation::validate_required_field(key, &get(key)).cloned()
        };

        let port = match get("PG_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                PipelineError::InvalidConfigValueError {
                    field: "PG_PORT".to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => DEFAULT_PG_PORT,
        };

        let local_file_path =
            get("LOCAL_FILE_PATH").unwrap_or_else(|| DEFAULT_LOCAL_FILE_PATH.to_string());

        Ok(Self {
            dataset: DatasetDescriptor::customer_personal_info(
                local_file_path,
                required("S3_PATH")?,
            ),
            connection: ConnectionProfile {
                host: required("PG_HOST")?,
                dbname: required("PG_DBNAME")?,
                user: required("PG_USER")?,
                // trust, peer and .pgpass setups run without one
                password: get("PG_PASSWORD").unwrap_or_default(),
                port,
            },
            s3_bucket_name: required("S3_BUCKET_NAME")?,
            topic_arn: required("TOPIC_ARN")?,
            support_email: get("SUPPORT_EMAIL").unwrap_or_else(|| DEFAULT_SUPPORT_EMAIL.to_string()),
            log_format: get("LOG_FORMAT")
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or_default(),
        })
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        let local_path = self.dataset.local_file_path.to_string_lossy();
        validate_path("LOCAL_FILE_PATH", &local_path)?;
        validate_s3_key("S3_PATH", &self.dataset.destination_key)?;
        validate_s3_bucket_name("S3_BUCKET_NAME", &self.s3_bucket_name)?;
        validate_topic_arn("TOPIC_ARN", &self.topic_arn)?;

        validate_non_empty_string("PG_HOST", &self.connection.host)?;
        validate_non_empty_string("PG_DBNAME", &self.connection.dbname)?;
        validate_non_empty_string("PG_USER", &self.connection.user)?;
        validate_range("PG_PORT", self.connection.port, 1, u16::MAX)?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
