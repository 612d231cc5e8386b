use crate::core::Pipeline;
use crate::domain::model::Preview;
use crate::utils::error::Result;
use serde::Serialize;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

/// What a finished run hands back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub output_path: String,
    pub contacts: usize,
    pub preview: Preview,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting contacts conversion");

        // Extract
        let source = self.pipeline.extract().await?;
        tracing::info!("Extracted {} source rows", source.table.len());

        // Transform
        let conversion = self.pipeline.transform(source).await?;
        let contacts = conversion.table.len();
        let preview = conversion.preview.clone();
        tracing::info!("Converted {} contacts", contacts);

        // Load
        let output_path = self.pipeline.load(conversion).await?;
        tracing::info!("💾 Output saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            contacts,
            preview,
        })
    }
}
