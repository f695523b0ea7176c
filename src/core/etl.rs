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

    /// Runs extract, transform and load in order and returns the output path.
    /// Any failure aborts the run before the next phase starts.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting transcode");
        self.monitor.log_phase("Start");

        let raw_records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_records.len());
        self.monitor.log_phase("Extract");

        let transformed = self.pipeline.transform(raw_records).await?;
        tracing::info!("Transformed {} records", transformed.records.len());
        self.monitor.log_phase("Transform");

        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_phase("Load");

        self.monitor.log_summary();
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CellValue, Record, TranscodeResult};
    use crate::utils::error::EtlError;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FailingExtract {
        loaded: AtomicBool,
    }

    #[async_trait::async_trait]
    impl Pipeline for FailingExtract {
        async fn extract(&self) -> Result<Vec<Record>> {
            Err(EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "incidents.csv",
            )))
        }

        async fn transform(&self, data: Vec<Record>) -> Result<TranscodeResult> {
            Ok(TranscodeResult {
                records: data,
                summary: Default::default(),
            })
        }

        async fn load(&self, _result: TranscodeResult) -> Result<String> {
            self.loaded.store(true, Ordering::SeqCst);
            Ok("incidents.json".to_string())
        }
    }

    struct InMemory;

    #[async_trait::async_trait]
    impl Pipeline for InMemory {
        async fn extract(&self) -> Result<Vec<Record>> {
            Ok(vec![vec![("lat", CellValue::from("1"))].into_iter().collect()])
        }

        async fn transform(&self, data: Vec<Record>) -> Result<TranscodeResult> {
            Ok(TranscodeResult {
                records: data,
                summary: Default::default(),
            })
        }

        async fn load(&self, result: TranscodeResult) -> Result<String> {
            assert_eq!(result.records.len(), 1);
            Ok("memory.json".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_returns_output_path() {
        let engine = EtlEngine::new(InMemory);
        assert_eq!(engine.run().await.unwrap(), "memory.json");
    }

    #[tokio::test]
    async fn test_run_without_monitoring_takes_no_samples() {
        let engine = EtlEngine::new(InMemory);
        engine.run().await.unwrap();

        assert!(!engine.monitor.is_enabled());
        assert_eq!(engine.monitor.samples_taken(), 0);
    }

    #[tokio::test]
    async fn test_failed_extract_skips_load() {
        let engine = EtlEngine::new(FailingExtract {
            loaded: AtomicBool::new(false),
        });

        let result = engine.run().await;

        assert!(matches!(result, Err(EtlError::IoError(_))));
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }
}
