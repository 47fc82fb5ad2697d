#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use table_export::core::{
    ConnectionProfile, DatabaseConnector, MessagePublisher, NotificationMessage, ObjectStore,
    PublishReceipt, TableConnection, TableRef, TableSnapshot, UploadReceipt,
};
use table_export::{AppConfig, PipelineError, Result};

pub const TOPIC_ARN: &str = "arn:aws:sns:us-east-1:123456789012:customer-exports";
pub const BUCKET: &str = "companyx-exports";
pub const S3_KEY: &str = "exports/customer_personal_info.csv";

pub fn test_config(local_file_path: &Path) -> AppConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("S3_PATH", S3_KEY.to_string()),
        ("S3_BUCKET_NAME", BUCKET.to_string()),
        ("TOPIC_ARN", TOPIC_ARN.to_string()),
        ("PG_HOST", "db.internal".to_string()),
        ("PG_DBNAME", "shop".to_string()),
        ("PG_USER", "reporter".to_string()),
        ("PG_PASSWORD", "secret".to_string()),
        ("LOCAL_FILE_PATH", local_file_path.to_string_lossy().into_owned()),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// 3 rows by 4 columns.
pub fn customer_snapshot() -> TableSnapshot {
    let row = |id: &str, name: &str, email: Option<&str>, city: &str| {
        vec![
            Some(id.to_string()),
            Some(name.to_string()),
            email.map(str::to_string),
            Some(city.to_string()),
        ]
    };
    TableSnapshot {
        columns: vec![
            "customer_id".to_string(),
            "full_name".to_string(),
            "email".to_string(),
            "city".to_string(),
        ],
        rows: vec![
            row("1", "Ada Lovelace", Some("ada@example.com"), "London"),
            row("2", "Linus Torvalds", None, "Helsinki"),
            row("3", "Grace Hopper", Some("grace@example.com"), "Arlington"),
        ],
    }
}

#[derive(Clone)]
pub enum DbBehavior {
    Unreachable,
    QueryFails,
    Returns(TableSnapshot),
}

#[derive(Clone)]
pub struct FakeDatabase {
    behavior: DbBehavior,
    pub connects: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
}

impl FakeDatabase {
    pub fn new(behavior: DbBehavior) -> Self {
        Self {
            behavior,
            connects: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

pub struct FakeConnection {
    behavior: DbBehavior,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl DatabaseConnector for FakeDatabase {
    type Connection = FakeConnection;

    async fn connect(&self, profile: &ConnectionProfile) -> Result<FakeConnection> {
        if let DbBehavior::Unreachable = self.behavior {
            return Err(PipelineError::ConnectionError {
                message: format!("could not connect to {}:{}", profile.host, profile.port),
            });
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(FakeConnection {
            behavior: self.behavior.clone(),
            closes: self.closes.clone(),
        })
    }
}

#[async_trait]
impl TableConnection for FakeConnection {
    async fn fetch_table(&mut self, table: &TableRef) -> Result<TableSnapshot> {
        match &self.behavior {
            DbBehavior::Returns(snapshot) => Ok(snapshot.clone()),
            _ => Err(PipelineError::QueryError {
                message: format!("relation \"{}\" does not exist", table),
            }),
        }
    }

    async fn close(self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// In-memory bucket. Objects are keyed by `bucket/key` and overwritten on every put.
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    pub fail: bool,
    pub puts: Arc<AtomicUsize>,
    pub objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryObjectStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&format!("{}/{}", bucket, key))
            .cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put_file(&self, source: &Path, bucket: &str, key: &str) -> Result<UploadReceipt> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PipelineError::UploadError {
                message: "AccessDenied".to_string(),
            });
        }
        let data = std::fs::read(source)?;
        let bytes = data.len() as u64;
        self.objects
            .lock()
            .unwrap()
            .insert(format!("{}/{}", bucket, key), data);
        Ok(UploadReceipt {
            bucket: bucket.to_string(),
            key: key.to_string(),
            bytes,
        })
    }
}

#[derive(Clone, Default)]
pub struct RecordingPublisher {
    pub fail: bool,
    pub attempts: Arc<Mutex<Vec<(String, NotificationMessage)>>>,
}

impl RecordingPublisher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<(String, NotificationMessage)> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn subjects(&self) -> Vec<String> {
        self.attempts()
            .into_iter()
            .map(|(_, message)| message.subject)
            .collect()
    }
}

#[async_trait]
impl MessagePublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, message: &NotificationMessage) -> Result<PublishReceipt> {
        self.attempts
            .lock()
            .unwrap()
            .push((topic.to_string(), message.clone()));
        if self.fail {
            return Err(PipelineError::NotifyError {
                message: "AuthorizationError".to_string(),
            });
        }
        Ok(PublishReceipt {
            message_id: Some(format!("msg-{}", self.attempts.lock().unwrap().len())),
            status_code: 200,
        })
    }
}

pub fn local_path(dir: &Path) -> PathBuf {
    dir.join("datasets").join("customer_personal_info.csv")
}
