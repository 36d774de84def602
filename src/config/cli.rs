use crate::config::toml_config::{MonitoringConfig, StandingsConfig};
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "league-standings")]
#[command(about = "Football league standings from API-Football")]
pub struct CliConfig {
    #[arg(long, help = "TOML config file; flags below override it")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "League display name (defaults to the first catalog entry)")]
    pub league: Option<String>,

    #[arg(long)]
    pub season: Option<u16>,

    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long)]
    pub api_host: Option<String>,

    #[arg(long, help = "Name of the environment variable holding the API key")]
    pub api_key_env: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Print the league catalog and exit")]
    pub list_leagues: bool,

    #[arg(long, help = "Read league selections from stdin, one per line")]
    pub interactive: bool,

    #[arg(long, help = "Write the standings to files instead of printing them")]
    pub export: bool,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    #[arg(long, help = "Bundle exported files into one zip archive")]
    pub zip: bool,

    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per export phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// File config (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<StandingsConfig> {
        let mut config = match &self.config {
            Some(path) => StandingsConfig::from_file(path)?,
            None => StandingsConfig::default(),
        };

        if let Some(season) = self.season {
            config.source.season = season;
        }
        if let Some(endpoint) = &self.endpoint {
            config.source.endpoint = endpoint.clone();
        }
        if let Some(api_host) = &self.api_host {
            config.source.api_host = api_host.clone();
        }
        if let Some(api_key_env) = &self.api_key_env {
            config.source.api_key_env = api_key_env.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = timeout;
        }
        if let Some(output_path) = &self.output_path {
            config.load.output_path = output_path.clone();
        }
        if !self.formats.is_empty() {
            config.load.output_formats = self.formats.clone();
        }
        if self.zip {
            config.load.compress = true;
        }
        if self.monitor {
            config.monitoring = Some(MonitoringConfig { enabled: true });
        }

        Ok(config)
    }
}
