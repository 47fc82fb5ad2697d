use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DATASET_NAME: &str = "customer_personal_info";
pub const DEFAULT_SOURCE_SCHEMA: &str = "shopping_order_reporting";
pub const DEFAULT_SOURCE_TABLE: &str = "customer_personal_info";
pub const DEFAULT_LOCAL_FILE_PATH: &str = "datasets/customer_personal_info.csv";
pub const DEFAULT_PG_PORT: u16 = 5432;

/// Schema-qualified table the extractor reads in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRef {
    pub schema: String,
    pub table: String,
}

impl TableRef {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }

    pub fn select_all_query(&self) -> String {
        format!("SELECT * FROM {}.{}", self.schema, self.table)
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetDescriptor {
    pub name: String,
    pub source_table: TableRef,
    pub local_file_path: PathBuf,
    pub destination_key: String,
}

impl DatasetDescriptor {
    pub fn customer_personal_info(
        local_file_path: impl Into<PathBuf>,
        destination_key: impl Into<String>,
    ) -> Self {
        Self {
            name: DEFAULT_DATASET_NAME.to_string(),
            source_table: TableRef::new(DEFAULT_SOURCE_SCHEMA, DEFAULT_SOURCE_TABLE),
            local_file_path: local_file_path.into(),
            destination_key: destination_key.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub host: String,
    pub dbname: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("host", &self.host)
            .field("dbname", &self.dbname)
            .field("user", &self.user)
            .field("password", &"***")
            .field("port", &self.port)
            .finish()
    }
}

/// Full result set of one query. `None` cells are SQL NULLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSnapshot {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractSummary {
    pub path: PathBuf,
    pub columns: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub bucket: String,
    pub key: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReceipt {
    pub message_id: Option<String>,
    pub status_code: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Extract,
    Upload,
}

/// Summary of a single run, logged once the pipeline reaches `Done`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub dataset: String,
    pub outcome: Outcome,
    pub failed_stage: Option<Stage>,
    pub failure_cause: Option<String>,
    pub rows_extracted: Option<usize>,
    pub notification_delivered: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
