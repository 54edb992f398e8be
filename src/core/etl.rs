use crate::core::Pipeline;
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

    pub fn monitor(&self) -> &SystemMonitor {
        &self.monitor
    }

    /// Runs extract, transform and load in order. Any error ends the run before
    /// the export is written.
    pub async fn run(&self) -> Result<String> {
        // Extract
        println!("Scraping municipal data...");
        let scraped = self.pipeline.extract().await?;
        println!("OK");
        tracing::info!("Extracted {} municipalities", scraped.listings.len());
        self.monitor.log_stats("Extract");

        // Transform
        let table = self.pipeline.transform(scraped).await?;
        tracing::info!(
            "Assembled {} records with {} columns",
            table.records.len(),
            table.columns.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_path = self.pipeline.load(table).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        println!("Export successfully completed: {}", output_path);
        Ok(output_path)
    }
}
