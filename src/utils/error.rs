use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Report source request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Report source returned {status}: {message}")]
    SourceError { status: u16, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code; every failure exits non-zero.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::SourceError { .. } => ErrorCategory::Network,
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 5xx from the report system is usually transient
            EtlError::SourceError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            EtlError::ApiError(e) if e.is_timeout() || e.is_connect() => ErrorSeverity::Medium,
            EtlError::ApiError(_) | EtlError::SourceError { .. } => ErrorSeverity::High,
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::ProcessingError { .. } => ErrorSeverity::High,
            EtlError::IoError(_) => ErrorSeverity::Critical,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the report export URL and its headers, then retry the run"
            }
            ErrorCategory::Data => {
                "Make sure the export contains the attendance columns and is valid UTF-8 CSV"
            }
            ErrorCategory::Storage => "Check that the output path exists and is writable",
            ErrorCategory::Configuration => {
                "Fix the configuration file or command line arguments and run again"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download the attendance report: {}", self),
            ErrorCategory::Data => format!("Could not read the attendance report: {}", self),
            ErrorCategory::Storage => format!("Could not save the cleaned report: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_severity_depends_on_status() {
        let transient = EtlError::SourceError {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        let fatal = EtlError::SourceError {
            status: 401,
            message: "Unauthorized".to_string(),
        };

        assert_eq!(transient.category(), ErrorCategory::Network);
        assert_eq!(transient.severity(), ErrorSeverity::Medium);
        assert_eq!(fatal.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = EtlError::MissingConfigError {
            field: "source.endpoint".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("source.endpoint"));
    }

    #[test]
    fn test_every_severity_exits_non_zero() {
        let codes: Vec<i32> = [
            ErrorSeverity::Medium,
            ErrorSeverity::High,
            ErrorSeverity::Critical,
        ]
        .into_iter()
        .map(ErrorSeverity::exit_code)
        .collect();

        assert_eq!(codes, vec![2, 1, 3]);
        assert!(codes.iter().all(|code| *code != 0));
    }
}
