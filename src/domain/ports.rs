use crate::domain::model::{Record, TranscodeResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn numeric_fields(&self) -> &[String];
    /// Fails when the configured delimiter is not a usable single byte.
    fn delimiter(&self) -> Result<u8>;
    /// Spaces per indentation level in the JSON output; 0 writes compact JSON.
    fn indent(&self) -> usize;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<TranscodeResult>;
    async fn load(&self, result: TranscodeResult) -> Result<String>;
}
