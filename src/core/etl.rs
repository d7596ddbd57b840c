use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct RosterEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RosterEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting roster build");

        tracing::info!("Extracting records...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_data.len());

        tracing::info!("Normalizing names...");
        let result = self.pipeline.transform(raw_data).await?;
        tracing::info!("Normalized {} names", result.roster.len());
        if !result.rejected.is_empty() {
            tracing::warn!("{} records had no usable name", result.rejected.len());
        }

        tracing::info!("Writing outputs...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
