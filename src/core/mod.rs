pub mod etl;
pub mod extractor;
pub mod notifier;
pub mod pipeline;
pub mod uploader;

pub use crate::domain::model::{
    ConnectionProfile, DatasetDescriptor, ExtractSummary, NotificationMessage, Outcome,
    PublishReceipt, RunReport, Stage, TableRef, TableSnapshot, UploadReceipt,
};
pub use crate::domain::ports::{DatabaseConnector, MessagePublisher, ObjectStore, TableConnection};
pub use crate::utils::error::Result;
