use thiserror::Error;

#[derive(Error, Debug)]
pub enum StandingsError {
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("Unexpected response shape: {message}")]
    SchemaError { message: String },

    #[error("Unknown league: {name}")]
    UnknownLeague { name: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// Which part of a request or run went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Upstream,
    Schema,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StandingsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StandingsError::TransportError(_) => ErrorCategory::Transport,
            StandingsError::UpstreamError { .. } => ErrorCategory::Upstream,
            StandingsError::SchemaError { .. } => ErrorCategory::Schema,
            StandingsError::UnknownLeague { .. }
            | StandingsError::ConfigError { .. }
            | StandingsError::MissingConfigError { .. }
            | StandingsError::InvalidConfigValueError { .. }
            | StandingsError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            StandingsError::ZipError(_)
            | StandingsError::CsvError(_)
            | StandingsError::IoError(_)
            | StandingsError::SerializationError(_)
            | StandingsError::ProcessingError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // A later request may well succeed.
            ErrorCategory::Transport | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Schema | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, StandingsError::UpstreamError { status: 429, .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StandingsError::TransportError(e) if e.is_timeout() => {
                "The API did not answer in time; raise --timeout-seconds or try again later"
            }
            StandingsError::TransportError(_) => {
                "Check the network connection and the configured endpoint"
            }
            StandingsError::UpstreamError { status: 429, .. } => {
                "The API rate limit was hit; wait before requesting again"
            }
            StandingsError::UpstreamError { status: 401 | 403, .. } => {
                "The API rejected the key; check the configured API key variable"
            }
            StandingsError::UpstreamError { .. } => {
                "Check the league id and season, or try again later"
            }
            StandingsError::SchemaError { .. } => {
                "The API answered with an unexpected payload; the season may have no standings yet"
            }
            StandingsError::UnknownLeague { .. } => {
                "Run with --list-leagues to see the available leagues"
            }
            StandingsError::MissingConfigError { .. } => {
                "Set the missing value in the environment, a .env file or the config file"
            }
            StandingsError::ConfigError { .. }
            | StandingsError::InvalidConfigValueError { .. }
            | StandingsError::ConfigValidationError { .. } => "Fix the configuration and run again",
            StandingsError::IoError(_) | StandingsError::ZipError(_) => {
                "Check that the output path exists and is writable"
            }
            StandingsError::CsvError(_)
            | StandingsError::SerializationError(_)
            | StandingsError::ProcessingError { .. } => "Re-run with --verbose for details",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Transport => format!("Could not reach the standings API: {}", self),
            ErrorCategory::Upstream => format!("The standings API refused the request: {}", self),
            ErrorCategory::Schema => {
                format!("The standings API returned data we could not read: {}", self)
            }
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Output => format!("Could not write the standings: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, StandingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failures_keep_distinct_categories() {
        let upstream = StandingsError::UpstreamError {
            status: 404,
            body: String::new(),
        };
        let schema = StandingsError::SchemaError {
            message: "response array is empty".to_string(),
        };

        assert_eq!(upstream.category(), ErrorCategory::Upstream);
        assert_eq!(schema.category(), ErrorCategory::Schema);
        assert_eq!(upstream.severity(), ErrorSeverity::Medium);
        assert_eq!(schema.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_rate_limit_detection() {
        let limited = StandingsError::UpstreamError {
            status: 429,
            body: "Too many requests".to_string(),
        };
        assert!(limited.is_rate_limited());
        assert!(limited.recovery_suggestion().contains("rate limit"));

        let not_found = StandingsError::UpstreamError {
            status: 404,
            body: String::new(),
        };
        assert!(!not_found.is_rate_limited());
    }

    #[test]
    fn test_missing_key_is_critical() {
        let err = StandingsError::MissingConfigError {
            field: "OPEN_FOOTBALL_API_KEY".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("OPEN_FOOTBALL_API_KEY"));
    }
}
