pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::{ApiKey, StandingsConfig};
pub use core::{
    etl::EtlEngine,
    fetcher::StandingsFetcher,
    pipeline::StandingsPipeline,
    selection::{LeagueDisplay, SelectionDriver},
    service::StandingsService,
};
pub use domain::catalog::LeagueCatalog;
pub use utils::error::{Result, StandingsError};
