#[cfg(feature = "cli")]
pub mod cli;
pub mod secrets;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, LogFormat};
pub use secrets::ApiKey;
pub use toml_config::StandingsConfig;
