use crate::core::{LoadOutcome, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline's extract, transform and load phases in order; the first error stops the run.
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

    pub async fn run(&self) -> Result<LoadOutcome> {
        tracing::info!("Starting ETL process...");

        let library = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", library.games.len());
        self.monitor.log_stats("extract");

        let transformed = self.pipeline.transform(library).await?;
        tracing::info!(
            "Transformed {} records into {} columns",
            transformed.table.rows().len(),
            transformed.table.headers().len()
        );
        self.monitor.log_stats("transform");

        let outcome = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", outcome.output_path);
        self.monitor.log_stats("load");

        Ok(outcome)
    }
}
