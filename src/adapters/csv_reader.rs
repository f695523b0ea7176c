use crate::domain::model::{CellValue, Record};
use crate::utils::error::{EtlError, Result};
use csv::ReaderBuilder;

/// Turns header-led delimited text into rows keyed by header name.
///
/// Every cell is kept verbatim as text. Rows shorter than the header get
/// empty strings for the missing trailing fields; cells past the last header
/// column are dropped. Input that ends inside a quoted field is rejected
/// instead of being folded into a single cell.
#[derive(Debug, Clone)]
pub struct CsvRecordReader {
    delimiter: u8,
}

impl CsvRecordReader {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn read(&self, data: &[u8]) -> Result<Vec<Record>> {
        if let Some(line) = unterminated_quote_line(data, self.delimiter) {
            return Err(EtlError::MalformedCsv {
                line,
                message: "quoted field is never closed".to_string(),
            });
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let headers = reader.headers()?.clone();
        tracing::debug!("CSV header: {:?}", headers.iter().collect::<Vec<_>>());

        let mut records = Vec::new();
        let mut overlong_rows = 0usize;

        for row in reader.records() {
            let row = row?;

            if row.len() > headers.len() {
                overlong_rows += 1;
                tracing::debug!(
                    "Row at line {} has {} cells, header has {}",
                    row.position().map(|p| p.line()).unwrap_or_default(),
                    row.len(),
                    headers.len()
                );
            }

            let mut record = Record::with_capacity(headers.len());
            for (index, name) in headers.iter().enumerate() {
                let cell = row.get(index).unwrap_or("");
                record.insert(name, CellValue::Text(cell.to_string()));
            }
            records.push(record);
        }

        if overlong_rows > 0 {
            tracing::warn!(
                "{} row(s) had more cells than the header; extra cells were ignored",
                overlong_rows
            );
        }

        Ok(records)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Walks the raw bytes with the default quoting rules (`"` quotes, `""`
/// escapes) and returns the line a still-open quoted field started on.
fn unterminated_quote_line(data: &[u8], delimiter: u8) -> Option<u64> {
    let mut state = QuoteState::FieldStart;
    let mut line = 1u64;
    let mut opened_at = 1u64;

    for &byte in data {
        state = match (state, byte) {
            (QuoteState::FieldStart, b'"') => {
                opened_at = line;
                QuoteState::Quoted
            }
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (_, b'\n' | b'\r') => QuoteState::FieldStart,
            (_, b) if b == delimiter => QuoteState::FieldStart,
            _ => QuoteState::Unquoted,
        };
        if byte == b'\n' {
            line += 1;
        }
    }

    (state == QuoteState::Quoted).then_some(opened_at)
}

impl Default for CsvRecordReader {
    fn default() -> Self {
        Self::new(b',')
    }
}
