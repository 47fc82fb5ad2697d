pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::run_export;
pub use config::AppConfig;
pub use crate::core::{etl::ExportJob, pipeline::PipelineState};
pub use domain::model::{Outcome, RunReport, Stage};
pub use utils::error::{PipelineError, Result};
