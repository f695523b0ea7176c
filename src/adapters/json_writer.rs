use crate::domain::model::Record;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Serializes the full document as a JSON array of objects.
///
/// Non-ASCII text is written as UTF-8, not `\u` escapes.
#[derive(Debug, Clone)]
pub struct JsonDocumentWriter {
    indent: usize,
}

impl JsonDocumentWriter {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }

    pub fn to_bytes(&self, records: &[Record]) -> Result<Vec<u8>> {
        if self.indent == 0 {
            return Ok(serde_json::to_vec(records)?);
        }

        let indent = " ".repeat(self.indent);
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(
            &mut buffer,
            PrettyFormatter::with_indent(indent.as_bytes()),
        );
        records.serialize(&mut serializer)?;
        Ok(buffer)
    }
}

impl Default for JsonDocumentWriter {
    fn default() -> Self {
        Self::new(2)
    }
}
