use super::{
    default_numeric_fields, delimiter_byte, DEFAULT_DELIMITER, DEFAULT_INDENT, DEFAULT_INPUT_PATH,
    DEFAULT_OUTPUT_PATH, MAX_INDENT,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_input_path")]
    pub path: String,
    /// Single ASCII character; TOML has no char type so this is a string.
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default = "default_numeric_fields")]
    pub numeric_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    pub indent: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_input_path() -> String {
    DEFAULT_INPUT_PATH.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
            delimiter: None,
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            numeric_fields: default_numeric_fields(),
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            indent: None,
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    fn delimiter_char(&self) -> Result<char> {
        let Some(delimiter) = self.source.delimiter.as_deref() else {
            return Ok(DEFAULT_DELIMITER);
        };

        let mut chars = delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(EtlError::InvalidConfigValueError {
                field: "source.delimiter".to_string(),
                value: delimiter.to_string(),
                reason: "Delimiter must be exactly one character".to_string(),
            }),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;

        if self.source.path == self.load.output_path {
            return Err(EtlError::ConfigValidationError {
                field: "load.output_path".to_string(),
                message: "Output would overwrite the input file".to_string(),
            });
        }

        self.delimiter()?;

        validation::validate_field_names(
            "transform.numeric_fields",
            &self.transform.numeric_fields,
        )?;

        if let Some(indent) = self.load.indent {
            validation::validate_range("load.indent", indent, 0, MAX_INDENT)?;
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn numeric_fields(&self) -> &[String] {
        &self.transform.numeric_fields
    }

    fn delimiter(&self) -> Result<u8> {
        delimiter_byte("source.delimiter", self.delimiter_char()?)
    }

    fn indent(&self) -> usize {
        self.load.indent.unwrap_or(DEFAULT_INDENT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let toml_content = r#"
[pipeline]
name = "incidents"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input_path(), "incidents.csv");
        assert_eq!(config.output_path(), "incidents.json");
        assert_eq!(config.numeric_fields(), ["lat", "lng"]);
        assert_eq!(config.delimiter().unwrap(), b',');
        assert_eq!(config.indent(), 2);
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[pipeline]
name = "district-incidents"
description = "Weekly export"

[source]
path = "exports/week.tsv"
delimiter = "\t"

[transform]
numeric_fields = ["latitude", "longitude"]

[load]
output_path = "public/data/week.json"
indent = 4

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "district-incidents");
        assert_eq!(config.input_path(), "exports/week.tsv");
        assert_eq!(config.delimiter().unwrap(), b'\t');
        assert_eq!(config.numeric_fields(), ["latitude", "longitude"]);
        assert_eq!(config.indent(), 4);
        assert!(config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("INCIDENT_ETL_TEST_EXPORT_DIR", "/srv/exports");

        let toml_content = r#"
[pipeline]
name = "env"

[source]
path = "${INCIDENT_ETL_TEST_EXPORT_DIR}/incidents.csv"

[load]
output_path = "${INCIDENT_ETL_TEST_UNSET_VAR}/incidents.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input_path(), "/srv/exports/incidents.csv");
        assert_eq!(
            config.output_path(),
            "${INCIDENT_ETL_TEST_UNSET_VAR}/incidents.json"
        );

        std::env::remove_var("INCIDENT_ETL_TEST_EXPORT_DIR");
    }

    #[test]
    fn test_config_validation() {
        let multi_char_delimiter = r#"
[pipeline]
name = "bad"

[source]
delimiter = "::"
"#;
        let config = TomlConfig::from_toml_str(multi_char_delimiter).unwrap();
        assert!(config.validate().is_err());

        let no_fields = r#"
[pipeline]
name = "bad"

[transform]
numeric_fields = []
"#;
        let config = TomlConfig::from_toml_str(no_fields).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_path_must_differ_from_input() {
        let toml_content = r#"
[pipeline]
name = "same-path"

[source]
path = "data/incidents.csv"

[load]
output_path = "data/incidents.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        match config.validate() {
            Err(EtlError::ConfigValidationError { field, .. }) => {
                assert_eq!(field, "load.output_path")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unvalidated_delimiter_is_rejected_at_use() {
        let toml_content = r#"
[pipeline]
name = "latin1"

[source]
delimiter = "é"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.delimiter().is_err());

        let multi_char = r#"
[pipeline]
name = "multi"

[source]
delimiter = "::"
"#;
        let config = TomlConfig::from_toml_str(multi_char).unwrap();
        assert!(config.delimiter().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[pipeline\nname = ");
        assert!(matches!(
            result,
            Err(EtlError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"

[load]
output_path = "out.json"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
        assert_eq!(config.output_path(), "out.json");
    }
}
