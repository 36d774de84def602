use crate::domain::model::LeagueId;
use crate::utils::error::{Result, StandingsError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueEntry {
    pub name: String,
    pub id: LeagueId,
}

/// Display name to league id lookup. Fixed once built; order is kept for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueCatalog {
    entries: Vec<LeagueEntry>,
}

impl LeagueCatalog {
    pub fn from_entries(entries: Vec<LeagueEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(StandingsError::ConfigValidationError {
                field: "leagues".to_string(),
                message: "at least one league is required".to_string(),
            });
        }

        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(StandingsError::InvalidConfigValueError {
                    field: "leagues.name".to_string(),
                    value: entry.name.clone(),
                    reason: "League name cannot be empty".to_string(),
                });
            }
            if !names.insert(entry.name.to_ascii_lowercase()) {
                return Err(StandingsError::InvalidConfigValueError {
                    field: "leagues.name".to_string(),
                    value: entry.name.clone(),
                    reason: "Duplicate league name".to_string(),
                });
            }
            if !ids.insert(entry.id) {
                return Err(StandingsError::InvalidConfigValueError {
                    field: "leagues.id".to_string(),
                    value: entry.id.to_string(),
                    reason: "Duplicate league id".to_string(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Exact match first, then ASCII case-insensitive.
    pub fn resolve(&self, name: &str) -> Option<LeagueId> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|entry| entry.name.eq_ignore_ascii_case(name))
            })
            .map(|entry| entry.id)
    }

    pub fn name_of(&self, id: LeagueId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.name.as_str())
    }

    pub fn default_league(&self) -> &LeagueEntry {
        // from_entries rejects an empty list
        &self.entries[0]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[LeagueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LeagueCatalog {
    fn default() -> Self {
        let entries = [
            ("English Premier League", 39),
            ("La Liga", 140),
            ("Serie A", 135),
            ("Bundesliga", 78),
            ("Ligue 1", 61),
        ]
        .into_iter()
        .map(|(name, id)| LeagueEntry {
            name: name.to_string(),
            id: LeagueId(id),
        })
        .collect();

        Self { entries }
    }
}
