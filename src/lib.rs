pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{SourceSpec, TomlConfig};

pub use adapters::{build_source, FileReportSource, HttpReportSource, LocalStorage};
pub use crate::core::{
    etl::{EtlEngine, RunSummary},
    pipeline::AttendancePipeline,
    processor::AttendanceProcessor,
};
pub use utils::error::{EtlError, Result};
