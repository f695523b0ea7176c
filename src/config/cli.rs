use super::{
    delimiter_byte, DEFAULT_DELIMITER, DEFAULT_INDENT, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH,
    MAX_INDENT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "incident-etl")]
#[command(about = "Convert an incident CSV export into a JSON document")]
pub struct CliConfig {
    /// CSV file to read
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    pub input: String,

    /// JSON file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// Columns converted to numbers (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "lat,lng")]
    pub numeric_fields: Vec<String>,

    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Spaces per indentation level, 0 for compact output
    #[arg(long, default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn numeric_fields(&self) -> &[String] {
        &self.numeric_fields
    }

    fn delimiter(&self) -> Result<u8> {
        delimiter_byte("delimiter", self.delimiter)
    }

    fn indent(&self) -> usize {
        self.indent
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_path("output", &self.output)?;
        if self.input == self.output {
            return Err(EtlError::ConfigValidationError {
                field: "output".to_string(),
                message: "Output would overwrite the input file".to_string(),
            });
        }
        validation::validate_field_names("numeric_fields", &self.numeric_fields)?;
        validation::validate_delimiter("delimiter", self.delimiter)?;
        validation::validate_range("indent", self.indent, 0, MAX_INDENT)?;
        Ok(())
    }
}
