use crate::domain::model::{
    ConnectionProfile, NotificationMessage, PublishReceipt, TableRef, TableSnapshot, UploadReceipt,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Opens connections to the source database.
#[async_trait]
pub trait DatabaseConnector: Send + Sync {
    type Connection: TableConnection;

    async fn connect(&self, profile: &ConnectionProfile) -> Result<Self::Connection>;
}

/// A live database session. `close` consumes the handle so it can only be released once.
#[async_trait]
pub trait TableConnection: Send + Sized {
    async fn fetch_table(&mut self, table: &TableRef) -> Result<TableSnapshot>;

    async fn close(self) -> Result<()>;
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Creates or overwrites `bucket/key` with the contents of the file at `source`.
    async fn put_file(&self, source: &Path, bucket: &str, key: &str) -> Result<UploadReceipt>;
}

#[async_trait]
pub trait MessagePublisher: Send + Sync {
    async fn publish(&self, topic: &str, message: &NotificationMessage) -> Result<PublishReceipt>;
}
