use crate::core::{Pipeline, RunSummary, WriteOutcome};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Run extract, transform and load once.
    ///
    /// Extract and transform errors are returned. A failed write is logged
    /// and reported through [`WriteOutcome::Failed`]; the merged records are
    /// still returned so the caller can print them.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting join");

        let input = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} states and {} city lists",
            input.states.len(),
            input.cities.len()
        );

        let records = self.pipeline.transform(input).await?;
        tracing::info!("Merged {} records", records.len());

        let outcome = match self.pipeline.load(&records).await {
            Ok(path) => {
                tracing::info!("Output saved to: {}", path);
                WriteOutcome::Saved { path }
            }
            Err(e) => {
                tracing::error!(
                    "Write failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                WriteOutcome::Failed {
                    reason: e.user_friendly_message(),
                }
            }
        };

        Ok(RunSummary { records, outcome })
    }
}
