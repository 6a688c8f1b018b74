use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Drives one job stage to completion: extract, transform, load.
///
/// Progress goes through `tracing` (stderr) so that stdout stays a clean
/// report channel.
pub struct JobEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> JobEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<()> {
        tracing::info!("Starting job");

        let lines = self.pipeline.extract().await?;
        tracing::info!("Read {} input lines", lines.len());

        let report = self.pipeline.transform(lines).await?;
        tracing::info!("Processed {} lines", report.lines_consumed);

        self.pipeline.load(report).await?;
        tracing::info!("Report written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemorySink, MemorySource};
    use crate::core::transactions::TransactionPipeline;

    #[tokio::test]
    async fn test_engine_runs_pipeline_to_completion() {
        let source = MemorySource::new(vec!["u1\tt1\t10".to_string()]);
        let sink = MemorySink::new();
        let engine = JobEngine::new(TransactionPipeline::new(source, sink.clone()));

        engine.run().await.unwrap();
        assert!(sink.contents().await.contains("u1\t10.00"));
    }
}
