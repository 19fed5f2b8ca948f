use crate::config::{default_report_date, SourceSpec};
use crate::core::report::{DEFAULT_REPORT_FILENAME, DEFAULT_REPORT_TITLE};
use crate::domain::model::OutputFormat;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_file_name, validate_non_empty_string, validate_path, Validate,
};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub report: ReportConfig,
    pub source: SourceSpec,
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
    /// Fixed at load time so a run crossing midnight keeps one date.
    #[serde(skip)]
    resolved_report_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub title: Option<String>,
    pub filename: Option<String>,
    pub report_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

fn default_output_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Csv]
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self =
            toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.resolved_report_date =
            Some(config.report.report_date.unwrap_or_else(default_report_date));
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as written so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().is_some_and(|l| l.json)
    }
}

impl ConfigProvider for TomlConfig {
    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn report_filename(&self) -> &str {
        self.report
            .filename
            .as_deref()
            .unwrap_or(DEFAULT_REPORT_FILENAME)
    }

    fn report_title(&self) -> &str {
        self.report.title.as_deref().unwrap_or(DEFAULT_REPORT_TITLE)
    }

    fn report_date(&self) -> NaiveDate {
        self.resolved_report_date
            .unwrap_or_else(default_report_date)
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.load.output_formats
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.source.validate()?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_file_name("report.filename", self.report_filename(), "csv")?;
        validate_non_empty_string("report.title", self.report_title())?;

        if self.load.output_formats.is_empty() {
            return Err(EtlError::InvalidConfigValueError {
                field: "load.output_formats".to_string(),
                value: "[]".to_string(),
                reason: "At least one output format is required".to_string(),
            });
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}
