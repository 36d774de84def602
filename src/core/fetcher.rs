use crate::config::secrets::ApiKey;
use crate::core::normalize::normalize_standings;
use crate::core::{ConfigProvider, StandingsQuery, StandingsSource, StandingsTable};
use crate::utils::error::{Result, StandingsError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const API_KEY_HEADER: &str = "X-RapidAPI-Key";
pub const API_HOST_HEADER: &str = "X-RapidAPI-Host";

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Issues the standings request and reshapes the answer. Stateless between calls.
pub struct StandingsFetcher {
    client: Client,
    endpoint: String,
    api_host: String,
    api_key: ApiKey,
}

impl StandingsFetcher {
    pub fn new(endpoint: String, api_host: String, api_key: ApiKey, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StandingsError::ConfigError {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_host,
            api_key,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C, api_key: ApiKey) -> Result<Self> {
        Self::new(
            config.api_endpoint().to_string(),
            config.api_host().to_string(),
            api_key,
            config.request_timeout(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn fetch_standings(&self, query: StandingsQuery) -> Result<StandingsTable> {
        tracing::debug!(
            "Requesting standings: {} league={} season={}",
            self.endpoint,
            query.league_id,
            query.season
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header(API_KEY_HEADER, self.api_key.expose())
            .header(API_HOST_HEADER, &self.api_host)
            .query(&[
                ("league", query.league_id.to_string()),
                ("season", query.season.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(StandingsError::UpstreamError {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = response.bytes().await?;
        normalize_standings(&body, query)
    }
}

#[async_trait]
impl StandingsSource for StandingsFetcher {
    async fn fetch_standings(&self, query: StandingsQuery) -> Result<StandingsTable> {
        StandingsFetcher::fetch_standings(self, query).await
    }
}
