#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::utils::error::{EtlError, Result};
use crate::utils::validation;

pub const DEFAULT_INPUT_PATH: &str = "incidents.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "incidents.json";
pub const DEFAULT_NUMERIC_FIELDS: [&str; 2] = ["lat", "lng"];
pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_INDENT: usize = 2;
pub const MAX_INDENT: usize = 8;

pub fn default_numeric_fields() -> Vec<String> {
    DEFAULT_NUMERIC_FIELDS.iter().map(|f| f.to_string()).collect()
}

/// Converts a delimiter to the byte the CSV reader takes, rejecting the same
/// characters `validate_delimiter` does.
pub(crate) fn delimiter_byte(field_name: &str, delimiter: char) -> Result<u8> {
    validation::validate_delimiter(field_name, delimiter)?;
    u8::try_from(delimiter).map_err(|_| EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: delimiter.escape_default().to_string(),
        reason: "Delimiter must be a single ASCII character".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_byte_rejects_instead_of_falling_back() {
        assert_eq!(delimiter_byte("delimiter", ';').unwrap(), b';');
        assert_eq!(delimiter_byte("delimiter", '\t').unwrap(), b'\t');

        for bad in ['é', '"', '\n', '，'] {
            assert!(matches!(
                delimiter_byte("delimiter", bad),
                Err(EtlError::InvalidConfigValueError { .. })
            ));
        }
    }
}
