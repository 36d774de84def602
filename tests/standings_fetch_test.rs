use httpmock::prelude::*;
use league_standings::core::StandingsRow;
use league_standings::{ApiKey, LeagueCatalog, StandingsError, StandingsFetcher, StandingsService};
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn service_for(server: &MockServer) -> StandingsService<StandingsFetcher> {
    let fetcher = StandingsFetcher::new(
        server.url("/v3/standings"),
        "api-football-v1.p.rapidapi.com".to_string(),
        ApiKey::new("scenario-key").unwrap(),
        Duration::from_secs(5),
    )
    .unwrap();
    StandingsService::new(fetcher, Arc::new(LeagueCatalog::default()), 2024)
}

#[tokio::test]
async fn test_single_team_scenario() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v3/standings")
            .query_param("league", "39")
            .query_param("season", "2024");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"response":[{"league":{"standings":[[{"rank":1,"team":{"name":"Arsenal"},"all":{"played":10,"win":8,"draw":1,"lose":1},"points":25}]]}}]}"#);
    });

    let service = service_for(&server);
    let view = service.standings_for("English Premier League").await;

    api_mock.assert();
    let table = view.table().expect("standings table");
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

#[tokio::test]
async fn test_not_found_scenario_is_absent() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/v3/standings");
        then.status(404);
    });

    let service = service_for(&server);

    assert!(service.standings_for("La Liga").await.is_absent());
    let err = assert_err!(service.fetch("La Liga").await);
    assert!(matches!(err, StandingsError::UpstreamError { status: 404, .. }));
    // One request per invocation, no retries.
    api_mock.assert_hits(2);
}

#[tokio::test]
async fn test_empty_response_scenario_is_absent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v3/standings");
        then.status(200).json_body(serde_json::json!({"response": []}));
    });

    let service = service_for(&server);

    assert!(service.standings_for("Serie A").await.is_absent());
    let err = assert_err!(service.fetch("Serie A").await);
    assert!(matches!(err, StandingsError::SchemaError { .. }));
}

#[tokio::test]
async fn test_quota_error_in_body_is_absent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v3/standings");
        then.status(200).json_body(serde_json::json!({
            "errors": {"requests": "You have reached the request limit for the day"},
            "response": []
        }));
    });

    let service = service_for(&server);

    let err = assert_err!(service.fetch("Bundesliga").await);
    assert!(matches!(err, StandingsError::UpstreamError { status: 200, .. }));
}

#[tokio::test]
async fn test_every_league_hits_its_own_id() {
    let server = MockServer::start();
    let body = serde_json::json!({"response": [{"league": {"standings": [[]]}}]});

    let mocks: Vec<_> = [39, 140, 135, 78, 61]
        .into_iter()
        .map(|id| {
            let body = body.clone();
            server.mock(move |when, then| {
                when.method(GET)
                    .path("/v3/standings")
                    .query_param("league", id.to_string());
                then.status(200).json_body(body);
            })
        })
        .collect();

    let service = service_for(&server);
    let names: Vec<String> = service.catalog().names().map(str::to_string).collect();
    for name in &names {
        // Empty but present team list: a valid, empty table.
        let table = assert_ok!(service.fetch(name).await);
        assert!(table.is_empty());
    }

    for api_mock in &mocks {
        api_mock.assert_hits(1);
    }
}
