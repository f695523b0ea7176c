use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A single cell after parsing: raw text, or the typed result of coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// One incident row. Fields keep the order they were first inserted in,
/// which for parsed rows is the header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Sets `name` to `value`. An existing field keeps its position and the
    /// previous value is returned; a new field is appended.
    pub fn insert(&mut self, name: &str, value: CellValue) -> Option<CellValue> {
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name.to_string(), value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'a> FromIterator<(&'a str, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (&'a str, CellValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Outcome counts for one designated field across the whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldTally {
    pub numeric: usize,
    pub null: usize,
    pub text: usize,
    /// Rows without the field at all; these are also counted under `null`.
    pub missing: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoercionSummary {
    pub fields: BTreeMap<String, FieldTally>,
}

impl CoercionSummary {
    pub fn tally(&self, field: &str) -> FieldTally {
        self.fields.get(field).copied().unwrap_or_default()
    }

    pub(crate) fn tally_mut(&mut self, field: &str) -> &mut FieldTally {
        self.fields.entry(field.to_string()).or_default()
    }
}

#[derive(Debug, Clone)]
pub struct TranscodeResult {
    pub records: Vec<Record>,
    pub summary: CoercionSummary,
}
