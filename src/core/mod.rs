pub mod etl;

pub use crate::app::pipelines::TranscodePipeline;
pub use crate::domain::model::{CellValue, Record, TranscodeResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
