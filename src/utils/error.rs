use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Database connection failed: {message}")]
    ConnectionError { message: String },

    #[error("Query failed: {message}")]
    QueryError { message: String },

    #[error("Failed to write extract file: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Upload failed: {message}")]
    UploadError { message: String },

    #[error("Notification failed: {message}")]
    NotifyError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Database,
    Filesystem,
    ObjectStore,
    Messaging,
}

impl PipelineError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PipelineError::ConnectionError { .. } | PipelineError::QueryError { .. } => {
                ErrorCategory::Database
            }
            PipelineError::WriteError(_) | PipelineError::CsvError(_) => ErrorCategory::Filesystem,
            PipelineError::UploadError { .. } => ErrorCategory::ObjectStore,
            PipelineError::NotifyError { .. } => ErrorCategory::Messaging,
            PipelineError::ConfigError { .. }
            | PipelineError::MissingConfigError { .. }
            | PipelineError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PipelineError::ConnectionError { .. } => {
                "Check PG_HOST/PG_PORT reachability and the database credentials"
            }
            PipelineError::QueryError { .. } => {
                "Check that the source table exists and the user can read it"
            }
            PipelineError::WriteError(_) | PipelineError::CsvError(_) => {
                "Check free disk space and write permission on LOCAL_FILE_PATH"
            }
            PipelineError::UploadError { .. } => {
                "Check the bucket name, AWS credentials and s3:PutObject permission"
            }
            PipelineError::NotifyError { .. } => {
                "Check TOPIC_ARN, AWS credentials and sns:Publish permission"
            }
            PipelineError::ConfigError { .. }
            | PipelineError::MissingConfigError { .. }
            | PipelineError::InvalidConfigValueError { .. } => {
                "Set the missing or invalid environment variable (a .env file is also read)"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = PipelineError::ConnectionError {
            message: "refused".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Database);

        let err = PipelineError::from(std::io::Error::other("disk full"));
        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert!(err.to_string().contains("disk full"));

        let err = PipelineError::MissingConfigError {
            field: "PG_HOST".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.to_string(), "Missing required configuration: PG_HOST");
    }
}
