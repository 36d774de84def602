use crate::utils::error::{Result, StandingsError};
use std::fmt;

pub const DEFAULT_API_KEY_ENV: &str = "OPEN_FOOTBALL_API_KEY";

/// RapidAPI key. Only ever read from the environment; never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(StandingsError::InvalidConfigValueError {
                field: "api_key".to_string(),
                value: String::new(),
                reason: "API key cannot be empty".to_string(),
            });
        }
        Ok(Self(value.trim().to_string()))
    }

    /// Loads `.env` if present, then reads `var_name`. Missing or blank is an error.
    pub fn from_env(var_name: &str) -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }

        let value = std::env::var(var_name).map_err(|_| StandingsError::MissingConfigError {
            field: var_name.to_string(),
        })?;

        Self::new(value).map_err(|_| StandingsError::MissingConfigError {
            field: var_name.to_string(),
        })
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
