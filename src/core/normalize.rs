//! Reshapes the upstream standings payload into a flat [`StandingsTable`].
//!
//! The expected body is
//! `{ "response": [ { "league": { "standings": [ [ team, ... ] ] } } ] }`
//! and only `response[0].league.standings[0]` is read.

use crate::domain::model::{StandingsQuery, StandingsRow, StandingsTable};
use crate::utils::error::{Result, StandingsError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct StandingsEnvelope {
    #[serde(default)]
    errors: serde_json::Value,
    response: Vec<LeagueEnvelope>,
}

#[derive(Debug, Deserialize)]
struct LeagueEnvelope {
    league: LeagueStandings,
}

#[derive(Debug, Deserialize)]
struct LeagueStandings {
    standings: Vec<Vec<TeamStanding>>,
}

#[derive(Debug, Deserialize)]
struct TeamStanding {
    rank: u32,
    team: TeamRef,
    all: MatchRecord,
    points: i32,
}

#[derive(Debug, Deserialize)]
struct TeamRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MatchRecord {
    played: u32,
    win: u32,
    draw: u32,
    lose: u32,
}

impl From<TeamStanding> for StandingsRow {
    fn from(team: TeamStanding) -> Self {
        StandingsRow {
            rank: team.rank,
            team: team.team.name,
            played: team.all.played,
            won: team.all.win,
            drawn: team.all.draw,
            lost: team.all.lose,
            points: team.points,
        }
    }
}

/// API-Football reports key and quota problems in `errors`, as `[]` or `{}` when clean.
fn has_upstream_errors(errors: &serde_json::Value) -> bool {
    match errors {
        serde_json::Value::Null => false,
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(map) => !map.is_empty(),
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Parses a 200 body. Rows keep upstream order and are not checked for consistency.
pub fn normalize_standings(body: &[u8], query: StandingsQuery) -> Result<StandingsTable> {
    let envelope: StandingsEnvelope =
        serde_json::from_slice(body).map_err(|e| StandingsError::SchemaError {
            message: format!("standings payload did not match: {}", e),
        })?;

    if has_upstream_errors(&envelope.errors) {
        return Err(StandingsError::UpstreamError {
            status: 200,
            body: envelope.errors.to_string(),
        });
    }

    let league = envelope
        .response
        .into_iter()
        .next()
        .ok_or_else(|| StandingsError::SchemaError {
            message: "response array is empty".to_string(),
        })?
        .league;

    let teams = league
        .standings
        .into_iter()
        .next()
        .ok_or_else(|| StandingsError::SchemaError {
            message: "league.standings is empty".to_string(),
        })?;

    let rows: Vec<StandingsRow> = teams.into_iter().map(StandingsRow::from).collect();
    tracing::debug!(
        "Normalized {} rows for league {} season {}",
        rows.len(),
        query.league_id,
        query.season
    );

    Ok(StandingsTable::new(query, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LeagueId;
    use crate::utils::error::ErrorCategory;

    fn query() -> StandingsQuery {
        StandingsQuery::new(LeagueId(39), 2024)
    }

    fn team(rank: u32, name: &str, played: u32, win: u32, draw: u32, lose: u32, points: i32) -> serde_json::Value {
        serde_json::json!({
            "rank": rank,
            "team": {"id": rank * 10, "name": name, "logo": "https://media.example/logo.png"},
            "points": points,
            "goalsDiff": 3,
            "all": {"played": played, "win": win, "draw": draw, "lose": lose,
                    "goals": {"for": 20, "against": 10}}
        })
    }

    fn body(teams: Vec<serde_json::Value>) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "get": "standings",
            "errors": [],
            "results": 1,
            "response": [{"league": {"id": 39, "name": "Premier League", "standings": [teams]}}]
        }))
        .unwrap()
    }

    #[test]
    fn test_single_team_scenario() {
        let body = br#"{"response":[{"league":{"standings":[[{"rank":1,"team":{"name":"Arsenal"},"all":{"played":10,"win":8,"draw":1,"lose":1},"points":25}]]}}]}"#;

        let table = normalize_standings(body, query()).unwrap();

        assert_eq!(table.query, query());
        assert_eq!(
            table.rows,
            vec![StandingsRow {
                rank: 1,
                team: "Arsenal".to_string(),
                played: 10,
                won: 8,
                drawn: 1,
                lost: 1,
                points: 25,
            }]
        );
    }

    #[test]
    fn test_preserves_upstream_order_and_count() {
        // Deliberately out of rank order: nothing is re-sorted.
        let teams = vec![
            team(2, "Liverpool", 10, 7, 2, 1, 23),
            team(1, "Arsenal", 10, 8, 1, 1, 25),
            team(3, "Chelsea", 10, 6, 3, 1, 21),
        ];

        let table = normalize_standings(&body(teams), query()).unwrap();

        assert_eq!(table.len(), 3);
        let names: Vec<&str> = table.rows.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(names, vec!["Liverpool", "Arsenal", "Chelsea"]);
        assert_eq!(table.rows[0].rank, 2);
    }

    #[test]
    fn test_fields_pass_through_without_derivation() {
        // Won + Drawn + Lost != Played, and negative points after a deduction.
        let teams = vec![team(20, "Everton", 12, 2, 3, 4, -3)];

        let table = normalize_standings(&body(teams), query()).unwrap();
        let row = &table.rows[0];

        assert_eq!(row.played, 12);
        assert_eq!((row.won, row.drawn, row.lost), (2, 3, 4));
        assert_eq!(row.points, -3);
    }

    #[test]
    fn test_empty_response_is_schema_error() {
        let err = normalize_standings(br#"{"response":[]}"#, query()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Schema);
    }

    #[test]
    fn test_missing_standings_key_is_schema_error() {
        let err = normalize_standings(br#"{"response":[{"league":{"id":39}}]}"#, query()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Schema);
    }

    #[test]
    fn test_empty_outer_standings_is_schema_error() {
        let err =
            normalize_standings(br#"{"response":[{"league":{"standings":[]}}]}"#, query()).unwrap_err();
        assert!(matches!(err, StandingsError::SchemaError { .. }));
    }

    #[test]
    fn test_empty_team_list_is_valid_empty_table() {
        let table = normalize_standings(&body(Vec::new()), query()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_non_json_body_is_schema_error() {
        let err = normalize_standings(b"<html>Service Unavailable</html>", query()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Schema);
    }

    #[test]
    fn test_wrongly_typed_field_is_schema_error() {
        let body = br#"{"response":[{"league":{"standings":[[{"rank":"first","team":{"name":"Arsenal"},"all":{"played":10,"win":8,"draw":1,"lose":1},"points":25}]]}}]}"#;
        let err = normalize_standings(body, query()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Schema);
    }

    #[test]
    fn test_upstream_errors_field_is_upstream_error() {
        let body = br#"{"errors":{"token":"Error/Missing application key."},"response":[]}"#;
        let err = normalize_standings(body, query()).unwrap_err();

        match err {
            StandingsError::UpstreamError { status, body } => {
                assert_eq!(status, 200);
                assert!(body.contains("Missing application key"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }
}
