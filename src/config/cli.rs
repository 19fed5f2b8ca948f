use crate::config::{default_report_date, SourceSpec};
use crate::core::report::{DEFAULT_REPORT_FILENAME, DEFAULT_REPORT_TITLE};
use crate::domain::model::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_file_name, validate_non_empty_string, validate_path, Validate,
};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "attendance-etl")]
#[command(about = "Cleans the daily supervisor attendance export and computes working hours")]
pub struct CliConfig {
    /// TOML configuration file; when given, the source and output flags are ignored
    #[arg(short, long)]
    pub config: Option<String>,

    /// Export URL of the attendance report
    #[arg(long, conflicts_with = "input_file")]
    pub source_url: Option<String>,

    /// Extra request header for the export URL, as `Name: value`
    #[arg(long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Read an export already saved to disk
    #[arg(long)]
    pub input_file: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_REPORT_FILENAME)]
    pub report_filename: String,

    #[arg(long, default_value = DEFAULT_REPORT_TITLE)]
    pub report_title: String,

    /// Day covered by the report (YYYY-MM-DD), defaults to yesterday
    #[arg(long)]
    pub report_date: Option<NaiveDate>,

    #[arg(long, value_delimiter = ',', default_value = "csv")]
    pub output_formats: Vec<OutputFormat>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Pins the report date so every artifact of the run agrees on it.
    pub fn resolve_report_date(mut self) -> Self {
        self.report_date = Some(self.report_date.unwrap_or_else(default_report_date));
        self
    }

    pub fn source_spec(&self) -> Result<SourceSpec> {
        if let Some(endpoint) = &self.source_url {
            return Ok(SourceSpec::Http {
                endpoint: endpoint.clone(),
                headers: parse_headers(&self.headers)?,
                timeout_seconds: self.timeout_seconds,
            });
        }

        match &self.input_file {
            Some(path) => Ok(SourceSpec::File { path: path.clone() }),
            None => Err(EtlError::MissingConfigError {
                field: "--source-url or --input-file".to_string(),
            }),
        }
    }
}

fn parse_headers(raw: &[String]) -> Result<HashMap<String, String>> {
    raw.iter()
        .map(|header| match header.split_once(':') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(EtlError::InvalidConfigValueError {
                field: "--header".to_string(),
                value: header.clone(),
                reason: "Expected `Name: value`".to_string(),
            }),
        })
        .collect()
}

impl ConfigProvider for CliConfig {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_filename(&self) -> &str {
        &self.report_filename
    }

    fn report_title(&self) -> &str {
        &self.report_title
    }

    fn report_date(&self) -> NaiveDate {
        self.report_date.unwrap_or_else(default_report_date)
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output_formats
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.source_spec()?.validate()?;
        validate_path("output_path", &self.output_path)?;
        validate_file_name("report_filename", &self.report_filename, "csv")?;
        validate_non_empty_string("report_title", &self.report_title)?;
        Ok(())
    }
}
