//! Numeric coercion for designated fields.
//!
//! A raw cell becomes `null` when it is blank, a number when its trimmed
//! text is a finite decimal literal, and otherwise stays text exactly as it
//! was read (surrounding whitespace included).

use crate::domain::model::{CellValue, CoercionSummary, Record, TranscodeResult};

/// Parses standard decimal notation: optional sign, digits, optional
/// fraction, optional exponent. Spellings of infinity and NaN are rejected
/// because JSON has no literal for them.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn coerce_numeric(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Null;
    }

    match parse_decimal(trimmed) {
        Some(number) => CellValue::Number(number),
        None => CellValue::Text(raw.to_string()),
    }
}

/// Applies [`coerce_numeric`] to a fixed set of field names on every row.
#[derive(Debug, Clone)]
pub struct FieldCoercer {
    fields: Vec<String>,
}

impl FieldCoercer {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn apply(&self, record: &mut Record, summary: &mut CoercionSummary) {
        for field in &self.fields {
            let tally = summary.tally_mut(field);

            let coerced = match record.get(field) {
                Some(CellValue::Text(raw)) => coerce_numeric(raw),
                // already typed; coercion happens once
                Some(_) => continue,
                None => {
                    tally.missing += 1;
                    coerce_numeric("")
                }
            };

            match &coerced {
                CellValue::Null => tally.null += 1,
                CellValue::Number(_) => tally.numeric += 1,
                CellValue::Text(_) => tally.text += 1,
            }

            record.insert(field, coerced);
        }
    }

    pub fn apply_all(&self, mut records: Vec<Record>) -> TranscodeResult {
        let mut summary = CoercionSummary::default();
        for field in &self.fields {
            summary.tally_mut(field);
        }

        for record in &mut records {
            self.apply(record, &mut summary);
        }

        TranscodeResult { records, summary }
    }
}
