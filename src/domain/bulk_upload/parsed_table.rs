// ============================================================
// PARSED TABLE TYPES
// ============================================================
// Normalized tabular content read from a CSV or workbook file

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::{AppError, Result};

/// Header row plus non-blank data rows of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTable {
    /// Cells of row 1, as found in the file
    pub headers: Vec<String>,

    /// Data rows, positionally aligned to `headers` (may be ragged)
    pub rows: Vec<Vec<String>>,

    /// Always equal to `rows.len()`
    pub total_rows: usize,
}

impl ParsedTable {
    /// Build a table from raw sheet rows: row 1 becomes the header, data rows
    /// whose every cell trims to empty are dropped.
    pub fn from_raw_rows(raw_rows: Vec<Vec<String>>) -> Result<Self> {
        let mut raw_rows = raw_rows.into_iter();
        let headers = raw_rows.next().ok_or(AppError::EmptyFile)?;

        let rows: Vec<Vec<String>> = raw_rows.filter(|row| !is_blank_row(row)).collect();

        if rows.is_empty() && is_blank_row(&headers) {
            return Err(AppError::EmptyFile);
        }

        let total_rows = rows.len();
        Ok(Self {
            headers,
            rows,
            total_rows,
        })
    }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Bounded slice of a [`ParsedTable`] for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePreviewData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,

    /// Row count of the full table, not of `rows`
    pub total_rows: usize,
}

/// One data row keyed by its literal header text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappedRecord(HashMap<String, String>);

impl MappedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later duplicates of the same header overwrite earlier ones.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.0.insert(header.into(), value.into());
    }

    /// Cell value for `header`, `""` when the header is absent.
    pub fn get(&self, header: &str) -> &str {
        self.0.get(header).map(String::as_str).unwrap_or("")
    }

    pub fn contains_header(&self, header: &str) -> bool {
        self.0.contains_key(header)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MappedRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = MappedRecord::new();
        for (header, value) in iter {
            record.insert(header, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_from_raw_rows_drops_blank_rows() {
        let table = ParsedTable::from_raw_rows(vec![
            row(&["a", "b"]),
            row(&["1", "2"]),
            row(&["  ", ""]),
            row(&[""]),
            row(&["3", ""]),
        ])
        .unwrap();

        assert_eq!(table.headers, row(&["a", "b"]));
        assert_eq!(table.rows, vec![row(&["1", "2"]), row(&["3", ""])]);
        assert_eq!(table.total_rows, 2);
    }

    #[test]
    fn test_header_only_table_has_zero_rows() {
        let table = ParsedTable::from_raw_rows(vec![row(&["精査軸"])]).unwrap();
        assert_eq!(table.total_rows, 0);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_no_rows_is_empty_file() {
        assert_eq!(ParsedTable::from_raw_rows(Vec::new()), Err(AppError::EmptyFile));
        assert_eq!(
            ParsedTable::from_raw_rows(vec![row(&["", " "]), row(&[""])]),
            Err(AppError::EmptyFile)
        );
    }

    #[test]
    fn test_mapped_record_missing_header_reads_empty() {
        let record: MappedRecord = [("精査軸", "CPA")].into_iter().collect();
        assert_eq!(record.get("精査軸"), "CPA");
        assert_eq!(record.get("休日実行"), "");
        assert!(!record.contains_header("休日実行"));
    }
}
