use crate::core::{ConfigProvider, ExportFormat};
use crate::domain::catalog::{LeagueCatalog, LeagueEntry};
use crate::config::secrets::DEFAULT_API_KEY_ENV;
use crate::utils::error::{Result, StandingsError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api-football-v1.p.rapidapi.com/v3/standings";
pub const DEFAULT_API_HOST: &str = "api-football-v1.p.rapidapi.com";
pub const DEFAULT_SEASON: u16 = 2024;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandingsConfig {
    #[serde(default)]
    pub source: SourceConfig,
    /// Replaces the built-in league list when present.
    #[serde(default)]
    pub leagues: Option<Vec<LeagueEntry>>,
    #[serde(default)]
    pub load: LoadConfig,
    #[serde(default)]
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    pub api_host: String,
    /// Name of the environment variable holding the key, never the key itself.
    pub api_key_env: String,
    pub timeout_seconds: u64,
    pub season: u16,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_host: DEFAULT_API_HOST.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            season: DEFAULT_SEASON,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compress: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            output_formats: vec!["csv".to_string()],
            compress: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl StandingsConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(StandingsError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StandingsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| StandingsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_non_empty_string("source.api_host", &self.source.api_host)?;
        validation::validate_non_empty_string("source.api_key_env", &self.source.api_key_env)?;
        validation::validate_positive_number("source.timeout_seconds", self.source.timeout_seconds, 1)?;
        validation::validate_range("source.season", self.source.season, 1000, 9999)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;

        for format in &self.load.output_formats {
            if ExportFormat::parse(format).is_none() {
                return Err(StandingsError::InvalidConfigValueError {
                    field: "load.output_formats".to_string(),
                    value: format.clone(),
                    reason: "Unsupported format. Valid formats: csv, tsv, json".to_string(),
                });
            }
        }

        self.catalog()?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<LeagueCatalog> {
        match &self.leagues {
            Some(entries) => LeagueCatalog::from_entries(entries.clone()),
            None => Ok(LeagueCatalog::default()),
        }
    }

    pub fn api_key_env(&self) -> &str {
        &self.source.api_key_env
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for StandingsConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn api_host(&self) -> &str {
        &self.source.api_host
    }

    fn season(&self) -> u16 {
        self.source.season
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> Vec<ExportFormat> {
        self.load
            .output_formats
            .iter()
            .filter_map(|format| ExportFormat::parse(format))
            .collect()
    }

    fn compress_output(&self) -> bool {
        self.load.compress
    }
}

impl Validate for StandingsConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
