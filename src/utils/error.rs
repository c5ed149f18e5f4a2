use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CepError {
    #[error("Invalid CEP '{input}': must contain exactly 8 digits")]
    InvalidFormat { input: String },

    #[error("Timeout: no provider answered within {deadline:?}")]
    Timeout { deadline: Duration },

    #[error("No provider returned a valid response")]
    NoValidResponse,

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CepError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CepError::Timeout { .. } | CepError::NoValidResponse => ErrorSeverity::Medium,
            CepError::InvalidFormat { .. }
            | CepError::ConfigError { .. }
            | CepError::ConfigValidationError { .. }
            | CepError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            CepError::HttpClientError(_)
            | CepError::IoError(_)
            | CepError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CepError::InvalidFormat { input } => {
                format!("'{}' is not a valid CEP (expected 8 digits)", input)
            }
            CepError::Timeout { deadline } => format!(
                "No provider answered within {} ms",
                deadline.as_millis()
            ),
            CepError::NoValidResponse => "Every provider failed to answer".to_string(),
            CepError::HttpClientError(_) => "Could not initialise the HTTP client".to_string(),
            CepError::IoError(e) => format!("File access failed: {}", e),
            CepError::SerializationError(_) => "Could not encode the result as JSON".to_string(),
            CepError::ConfigError { .. }
            | CepError::ConfigValidationError { .. }
            | CepError::InvalidConfigValueError { .. } => {
                format!("Invalid configuration: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CepError::InvalidFormat { .. } => {
                "Pass the CEP as 8 digits, with or without a hyphen (e.g. 01001-000)"
            }
            CepError::Timeout { .. } => {
                "Check your network connection or raise the deadline with --deadline-ms"
            }
            CepError::NoValidResponse => {
                "Verify the CEP exists and run with --verbose to see each provider's error"
            }
            CepError::HttpClientError(_) => "Check the [http] section of the configuration",
            CepError::IoError(_) => "Make sure the configuration file exists and is readable",
            CepError::SerializationError(_) => "Run again without --json",
            CepError::ConfigError { .. }
            | CepError::ConfigValidationError { .. }
            | CepError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again with --dry-run to check it"
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

/// Why a single provider did not produce a usable result. Never surfaced to
/// callers of the race; only logged.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request cancelled")]
    Cancelled,

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("unexpected status: {status}")]
    UnexpectedStatus { status: reqwest::StatusCode },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ProviderError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, CepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_race_errors_are_retryable_severity() {
        let timeout = CepError::Timeout {
            deadline: Duration::from_secs(1),
        };
        assert_eq!(timeout.severity(), ErrorSeverity::Medium);
        assert_eq!(CepError::NoValidResponse.severity(), ErrorSeverity::Medium);
        assert_eq!(timeout.exit_code(), 2);
    }

    #[test]
    fn test_invalid_format_message() {
        let err = CepError::InvalidFormat {
            input: "12345".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("12345"));
        assert!(err.user_friendly_message().contains("8 digits"));
    }

    #[test]
    fn test_provider_error_cancelled() {
        assert!(ProviderError::Cancelled.is_cancelled());
        assert!(!ProviderError::Other("boom".to_string()).is_cancelled());
    }
}
