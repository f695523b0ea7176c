pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::LocalStorage;
pub use config::TomlConfig;
pub use crate::core::{etl::EtlEngine, TranscodePipeline};
pub use domain::coercion::{coerce_numeric, FieldCoercer};
pub use domain::model::{CellValue, Record};
pub use utils::error::{EtlError, Result};
