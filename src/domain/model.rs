use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric competition code assigned by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueId(pub u32);

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsQuery {
    pub league_id: LeagueId,
    pub season: u16,
}

impl StandingsQuery {
    pub fn new(league_id: LeagueId, season: u16) -> Self {
        Self { league_id, season }
    }
}

/// One team line, copied field for field from the upstream payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Played")]
    pub played: u32,
    #[serde(rename = "Won")]
    pub won: u32,
    #[serde(rename = "Drawn")]
    pub drawn: u32,
    #[serde(rename = "Lost")]
    pub lost: u32,
    #[serde(rename = "Points")]
    pub points: i32,
}

impl StandingsRow {
    pub const COLUMNS: [&'static str; 7] =
        ["Rank", "Team", "Played", "Won", "Drawn", "Lost", "Points"];
}

/// Rows in the order the upstream returned them. Never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsTable {
    pub query: StandingsQuery,
    pub fetched_at: DateTime<Utc>,
    pub rows: Vec<StandingsRow>,
}

impl StandingsTable {
    pub fn new(query: StandingsQuery, rows: Vec<StandingsRow>) -> Self {
        Self {
            query,
            fetched_at: Utc::now(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for StandingsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let team_width = self
            .rows
            .iter()
            .map(|row| row.team.chars().count())
            .chain(std::iter::once(StandingsRow::COLUMNS[1].len()))
            .max()
            .unwrap_or(4);

        writeln!(
            f,
            "{:>4}  {:<team_width$}  {:>6}  {:>4}  {:>5}  {:>4}  {:>6}",
            "Rank", "Team", "Played", "Won", "Drawn", "Lost", "Points"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>4}  {:<team_width$}  {:>6}  {:>4}  {:>5}  {:>4}  {:>6}",
                row.rank, row.team, row.played, row.won, row.drawn, row.lost, row.points
            )?;
        }
        Ok(())
    }
}

/// What the display layer gets: a table, or the single "no data" signal.
#[derive(Debug, Clone, PartialEq)]
pub enum StandingsView {
    Table(StandingsTable),
    Absent,
}

impl StandingsView {
    pub const ABSENT_MESSAGE: &'static str = "Error fetching data from API";

    pub fn table(&self) -> Option<&StandingsTable> {
        match self {
            StandingsView::Table(table) => Some(table),
            StandingsView::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, StandingsView::Absent)
    }
}

impl fmt::Display for StandingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandingsView::Table(table) => write!(f, "{}", table),
            StandingsView::Absent => writeln!(f, "{}", Self::ABSENT_MESSAGE),
        }
    }
}

/// Rendered export payloads, one per requested format.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub table: StandingsTable,
    pub outputs: Vec<RenderedOutput>,
}

#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub format: ExportFormat,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Tsv, ExportFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(value.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arsenal() -> StandingsRow {
        StandingsRow {
            rank: 1,
            team: "Arsenal".to_string(),
            played: 10,
            won: 8,
            drawn: 1,
            lost: 1,
            points: 25,
        }
    }

    #[test]
    fn test_row_serializes_with_display_column_names() {
        let json = serde_json::to_value(arsenal()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Rank": 1, "Team": "Arsenal", "Played": 10,
                "Won": 8, "Drawn": 1, "Lost": 1, "Points": 25
            })
        );
    }

    #[test]
    fn test_table_display_has_header_and_rows() {
        let table = StandingsTable::new(StandingsQuery::new(LeagueId(39), 2024), vec![arsenal()]);
        let rendered = table.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Rank"));
        assert!(lines[0].contains("Points"));
        assert!(lines[1].contains("Arsenal"));
        assert!(lines[1].trim_end().ends_with("25"));
    }

    #[test]
    fn test_absent_view_renders_placeholder() {
        let view = StandingsView::Absent;
        assert!(view.is_absent());
        assert!(view.table().is_none());
        assert_eq!(view.to_string().trim(), "Error fetching data from API");
    }

    #[test]
    fn test_empty_table_is_not_absent() {
        let view = StandingsView::Table(StandingsTable::new(
            StandingsQuery::new(LeagueId(61), 2024),
            Vec::new(),
        ));
        assert!(!view.is_absent());
        assert!(view.table().unwrap().is_empty());
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!(ExportFormat::parse("csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse(" TSV "), Some(ExportFormat::Tsv));
        assert_eq!(ExportFormat::parse("xlsx"), None);
    }
}
