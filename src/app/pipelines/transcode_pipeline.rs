use crate::adapters::{CsvRecordReader, JsonDocumentWriter};
use crate::domain::coercion::FieldCoercer;
use crate::domain::model::{Record, TranscodeResult};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;

/// Reads the CSV source, coerces the designated numeric fields and writes the
/// JSON document. The output is only written once every row has been parsed
/// and coerced, so a failing run leaves the sink untouched.
pub struct TranscodePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    coercer: FieldCoercer,
}

impl<S: Storage, C: ConfigProvider> TranscodePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let coercer = FieldCoercer::new(config.numeric_fields().to_vec());
        Self {
            storage,
            config,
            coercer,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for TranscodePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading CSV source: {}", input_path);

        let data = self.storage.read_file(input_path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), input_path);

        CsvRecordReader::new(self.config.delimiter()?).read(&data)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TranscodeResult> {
        tracing::debug!("Coercing fields {:?}", self.coercer.fields());

        let result = self.coercer.apply_all(data);

        for (field, tally) in &result.summary.fields {
            tracing::info!(
                "Field '{}': {} numeric, {} null, {} kept as text",
                field,
                tally.numeric,
                tally.null,
                tally.text
            );
            if tally.missing > 0 {
                tracing::warn!(
                    "Field '{}' missing from {} record(s); written as null",
                    field,
                    tally.missing
                );
            }
        }

        Ok(result)
    }

    async fn load(&self, result: TranscodeResult) -> Result<String> {
        let output_path = self.config.output_path();

        let json_data = JsonDocumentWriter::new(self.config.indent()).to_bytes(&result.records)?;

        tracing::debug!("Writing JSON document ({} bytes)", json_data.len());
        self.storage.write_file(output_path, &json_data).await?;

        Ok(output_path.to_string())
    }
}
