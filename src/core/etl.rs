use crate::core::{Pipeline, StandingsQuery};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self, query: StandingsQuery) -> Result<String> {
        tracing::info!(
            "Exporting standings for league {} season {}",
            query.league_id,
            query.season
        );
        self.monitor.log_stats("Start");

        let table = self.pipeline.extract(query).await?;
        tracing::info!("Extracted {} rows", table.len());
        self.monitor.log_stats("Extract");

        let result = self.pipeline.transform(table).await?;
        tracing::info!("Rendered {} output formats", result.outputs.len());
        self.monitor.log_stats("Transform");

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitor.is_enabled()
    }
}
