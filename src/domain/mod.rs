// Domain layer: core models and ports (interfaces). Adapters implement the ports for PostgreSQL, S3 and SNS.

pub mod model;
pub mod ports;
