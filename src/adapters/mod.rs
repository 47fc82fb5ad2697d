// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod postgres;
pub mod s3;
pub mod sns;

pub use postgres::{PgConnector, PgTableConnection};
pub use s3::S3ObjectStore;
pub use sns::SnsPublisher;
