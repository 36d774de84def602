use crate::core::{StandingsQuery, StandingsSource, StandingsTable, StandingsView};
use crate::domain::catalog::LeagueCatalog;
use crate::utils::error::{Result, StandingsError};
use std::sync::Arc;

/// League name in, standings out. The only place fetch failures are collapsed.
pub struct StandingsService<S: StandingsSource> {
    source: S,
    catalog: Arc<LeagueCatalog>,
    season: u16,
}

impl<S: StandingsSource> StandingsService<S> {
    pub fn new(source: S, catalog: Arc<LeagueCatalog>, season: u16) -> Self {
        Self {
            source,
            catalog,
            season,
        }
    }

    pub fn catalog(&self) -> &LeagueCatalog {
        &self.catalog
    }

    pub fn season(&self) -> u16 {
        self.season
    }

    pub fn resolve(&self, league_name: &str) -> Result<StandingsQuery> {
        let league_id =
            self.catalog
                .resolve(league_name)
                .ok_or_else(|| StandingsError::UnknownLeague {
                    name: league_name.to_string(),
                })?;
        Ok(StandingsQuery::new(league_id, self.season))
    }

    pub async fn fetch(&self, league_name: &str) -> Result<StandingsTable> {
        let query = self.resolve(league_name)?;
        self.source.fetch_standings(query).await
    }

    /// Failures are logged with their category and surface as [`StandingsView::Absent`].
    pub async fn standings_for(&self, league_name: &str) -> StandingsView {
        match self.fetch(league_name).await {
            Ok(table) => {
                tracing::info!("✅ {}: {} teams", league_name, table.len());
                StandingsView::Table(table)
            }
            Err(e) => {
                tracing::warn!(
                    "❌ {}: no standings ({:?}): {}",
                    league_name,
                    e.category(),
                    e
                );
                if e.is_rate_limited() {
                    tracing::warn!("💡 {}", e.recovery_suggestion());
                }
                StandingsView::Absent
            }
        }
    }
}
