pub mod etl;
pub mod fetcher;
pub mod normalize;
pub mod pipeline;
pub mod selection;
pub mod service;

pub use crate::domain::model::{
    ExportFormat, LeagueId, RenderedOutput, StandingsQuery, StandingsRow, StandingsTable,
    StandingsView, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, StandingsSource, Storage};
pub use crate::utils::error::Result;
