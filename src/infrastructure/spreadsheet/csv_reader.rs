// ============================================================
// CSV READER
// ============================================================
// Decode CSV bytes (Shift-JIS unless a BOM says otherwise) into raw rows

use csv::{ReaderBuilder, Trim};
use encoding_rs::{Encoding, SHIFT_JIS};
use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};

/// CSV reader for spreadsheet exports from Windows tooling
pub struct CsvReader {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Encoding used when the bytes carry no BOM
    fallback_encoding: &'static Encoding,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self {
            delimiter: b',',
            fallback_encoding: SHIFT_JIS,
        }
    }
}

impl CsvReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Decode and split CSV bytes into rows. Rows keep their original length
    /// and cells are not trimmed.
    pub fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>> {
        let content = self.decode(bytes);
        self.parse_content(&content)
    }

    /// Decode bytes to text. Malformed sequences become U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (encoding, bom_len) =
            Encoding::for_bom(bytes).unwrap_or((self.fallback_encoding, 0));

        let (content, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            warn!(
                encoding = encoding.name(),
                "CSV contained byte sequences invalid for its encoding"
            );
        }
        debug!(encoding = encoding.name(), bytes = bytes.len(), "Decoded CSV");

        content.into_owned()
    }

    pub fn parse_content(&self, content: &str) -> Result<Vec<Vec<String>>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .trim(Trim::None)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Error parsing CSV: row {}: {}", index + 1, e))
            })?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(rows)
    }
}
