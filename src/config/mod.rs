#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, validate_url, Validate};
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where the attendance export is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceSpec {
    Http {
        endpoint: String,
        #[serde(default)]
        headers: HashMap<String, String>,
        timeout_seconds: Option<u64>,
    },
    File {
        path: String,
    },
}

impl Validate for SourceSpec {
    fn validate(&self) -> Result<()> {
        match self {
            SourceSpec::Http {
                endpoint,
                timeout_seconds,
                ..
            } => {
                validate_url("source.endpoint", endpoint)?;
                if let Some(timeout) = timeout_seconds {
                    validate_positive_number("source.timeout_seconds", *timeout, 1)?;
                }
                Ok(())
            }
            SourceSpec::File { path } => validate_path("source.path", path),
        }
    }
}

/// The export runs the morning after, so the report covers yesterday.
pub fn default_report_date() -> NaiveDate {
    let today = Local::now().date_naive();
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}
