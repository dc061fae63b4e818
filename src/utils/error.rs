use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeederError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Reference data '{file}' could not be parsed: {message}")]
    ReferenceDataError { file: String, message: String },

    #[error("Reference data '{file}' is empty")]
    EmptyReferenceData { file: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SeederError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SeederError::ApiError(_) => ErrorCategory::Network,
            SeederError::ConfigError { .. }
            | SeederError::ConfigValidationError { .. }
            | SeederError::InvalidConfigValueError { .. }
            | SeederError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SeederError::CsvError(_)
            | SeederError::SerializationError(_)
            | SeederError::ReferenceDataError { .. }
            | SeederError::EmptyReferenceData { .. } => ErrorCategory::Data,
            SeederError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常可以重跑解決
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 對應 binary 的退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SeederError::ApiError(e) if e.is_connect() => {
                "Make sure the API server is running and the base URL is reachable".to_string()
            }
            SeederError::ApiError(e) if e.is_timeout() => {
                "Increase --timeout-seconds or check the API server load".to_string()
            }
            SeederError::ApiError(_) => {
                "Check the base URL and token; records submitted before the failure were kept"
                    .to_string()
            }
            SeederError::ReferenceDataError { file, .. } => format!(
                "Check that '{}' is a JSON array in the expected shape",
                file
            ),
            SeederError::EmptyReferenceData { file } => {
                format!("Add at least one entry to '{}'", file)
            }
            SeederError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            SeederError::ConfigError { .. }
            | SeederError::ConfigValidationError { .. }
            | SeederError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            SeederError::IoError(_) => {
                "Check that the file exists and that the process can read/write it".to_string()
            }
            SeederError::CsvError(_) | SeederError::SerializationError(_) => {
                "Check the export path and format".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the device API: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Bad fixture data: {}", self),
            ErrorCategory::Io => format!("File system error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SeederError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_errors_are_high_severity() {
        let err = SeederError::EmptyReferenceData {
            file: "places.json".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.recovery_suggestion().contains("places.json"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = SeederError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().starts_with("File system error"));
    }

    #[test]
    fn test_config_error_message() {
        let err = SeederError::InvalidConfigValueError {
            field: "batches".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(
            err.to_string(),
            "Invalid value '0' for 'batches': Value must be at least 1"
        );
    }
}
