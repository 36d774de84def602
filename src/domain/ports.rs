use crate::domain::model::{ExportFormat, StandingsQuery, StandingsTable, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_host(&self) -> &str;
    fn season(&self) -> u16;
    fn request_timeout(&self) -> Duration;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Vec<ExportFormat>;
    fn compress_output(&self) -> bool;
}

/// Anything that can answer a standings query. One call, one upstream request.
#[async_trait]
pub trait StandingsSource: Send + Sync {
    async fn fetch_standings(&self, query: StandingsQuery) -> Result<StandingsTable>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self, query: StandingsQuery) -> Result<StandingsTable>;
    async fn transform(&self, table: StandingsTable) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
