use crate::core::converter::{ConvertOptions, Converter};
use crate::core::{Conversion, ConfigProvider, Pipeline, SourceTable, Storage};
use crate::utils::error::Result;

/// Drives a [`Converter`] through the `Pipeline` port: read the upload from
/// storage, convert it, write the Google CSV back.
pub struct ContactsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    converter: Converter,
}

impl<S: Storage, C: ConfigProvider> ContactsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let converter = Converter::new(ConvertOptions {
            sample_size: config.sample_size(),
            preview_rows: config.preview_rows(),
        });
        Self {
            storage,
            config,
            converter,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ContactsPipeline<S, C> {
    async fn extract(&self) -> Result<SourceTable> {
        tracing::debug!("Reading input file: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        tracing::debug!(
            "Read {} bytes, sniffing the first {}",
            bytes.len(),
            self.converter.options().sample_size
        );

        // 整份檔案讀完才開始解析
        self.converter.read_table(&bytes)
    }

    async fn transform(&self, source: SourceTable) -> Result<Conversion> {
        self.converter.convert_table(&source)
    }

    async fn load(&self, conversion: Conversion) -> Result<String> {
        let output_path = self.config.output_path();

        tracing::debug!(
            "Writing {} bytes to storage: {}",
            conversion.csv_output.len(),
            output_path
        );
        self.storage
            .write_file(output_path, &conversion.csv_output)
            .await?;

        Ok(output_path.to_string())
    }
}
