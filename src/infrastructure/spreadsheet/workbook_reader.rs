// ============================================================
// WORKBOOK READER
// ============================================================
// Read the first sheet of an xls/xlsx workbook into raw string rows

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use chrono::Timelike;
use tracing::{debug, warn};

use crate::domain::error::{AppError, Result};

/// How cell values are turned into strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStrategy {
    /// Dates rendered as dates; error cells fail the sheet
    Strict,
    /// Raw values only: dates as serial numbers, error cells as `""`
    Lenient,
}

impl CellStrategy {
    pub fn convert(&self, cell: &Data, row: usize, col: usize) -> Result<String> {
        let value = match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => f.to_string(),
            Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
            Data::DateTime(dt) => match self {
                CellStrategy::Strict => {
                    let datetime = cell.as_datetime().ok_or_else(|| {
                        AppError::ParseError(format!(
                            "Cell {} holds an unreadable date",
                            cell_reference(row, col)
                        ))
                    })?;
                    if datetime.hour() == 0 && datetime.minute() == 0 && datetime.second() == 0 {
                        datetime.format("%Y-%m-%d").to_string()
                    } else {
                        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
                    }
                }
                CellStrategy::Lenient => dt.as_f64().to_string(),
            },
            Data::Error(e) => match self {
                CellStrategy::Strict => {
                    return Err(AppError::ParseError(format!(
                        "Cell {} contains error value {:?}",
                        cell_reference(row, col),
                        e
                    )))
                }
                CellStrategy::Lenient => String::new(),
            },
        };
        Ok(value)
    }
}

/// Workbook reader with an ordered chain of cell strategies
pub struct WorkbookReader {
    strategies: Vec<CellStrategy>,
}

impl Default for WorkbookReader {
    fn default() -> Self {
        Self {
            strategies: vec![CellStrategy::Strict, CellStrategy::Lenient],
        }
    }
}

impl WorkbookReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategies(strategies: Vec<CellStrategy>) -> Self {
        Self { strategies }
    }

    /// Decode workbook bytes and convert the first sheet. Other sheets are ignored.
    pub fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
            AppError::ParseError(format!("Error parsing Excel file: {}", e))
        })?;

        let sheet_names = workbook.sheet_names();
        debug!(sheets = ?sheet_names, "Workbook opened");

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(AppError::EmptyFile)?
            .map_err(|e| AppError::ParseError(format!("Error parsing Excel file: {}", e)))?;

        self.rows_from_range(&range)
    }

    /// Convert a sheet range, falling through the strategy chain. Only the
    /// last strategy's failure is returned.
    pub fn rows_from_range(&self, range: &Range<Data>) -> Result<Vec<Vec<String>>> {
        let mut last_error =
            AppError::ParseError("Error parsing Excel file: no conversion strategy".to_string());

        for (attempt, strategy) in self.strategies.iter().enumerate() {
            match convert_range(range, *strategy) {
                Ok(rows) => {
                    debug!(?strategy, rows = rows.len(), "Sheet converted");
                    return Ok(rows);
                }
                Err(err) => {
                    warn!(?strategy, attempt, error = %err, "Sheet conversion failed");
                    last_error = err;
                }
            }
        }

        Err(match last_error {
            AppError::ParseError(msg) if !msg.starts_with("Error parsing Excel file") => {
                AppError::ParseError(format!("Error parsing Excel file: {}", msg))
            }
            other => other,
        })
    }
}

/// Cell positions are sheet-absolute: a range starts at its first used cell,
/// which need not be A1.
fn convert_range(range: &Range<Data>, strategy: CellStrategy) -> Result<Vec<Vec<String>>> {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    range
        .rows()
        .enumerate()
        .map(|(row_idx, row)| {
            row.iter()
                .enumerate()
                .map(|(col_idx, cell)| {
                    strategy.convert(
                        cell,
                        first_row as usize + row_idx,
                        first_col as usize + col_idx,
                    )
                })
                .collect::<Result<Vec<String>>>()
        })
        .collect()
}

/// Zero-based position to an A1-style reference.
fn cell_reference(row: usize, col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect::<String>() + &(row + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(1) as u32;
        let mut range = Range::new((0, 0), (cells.len() as u32 - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    #[test]
    fn test_strict_conversion_of_mixed_cells() {
        let range = sheet(&[
            &[text("精査軸"), text("精査ポイント"), text("休日実行")],
            &[text("CPA"), Data::Float(30.0), Data::Bool(true)],
            &[text("CPC"), Data::Float(12.5), Data::Empty],
            &[text("CPM"), Data::Int(7)],
        ]);

        let rows = WorkbookReader::new().rows_from_range(&range).unwrap();
        assert_eq!(rows[1], vec!["CPA", "30", "TRUE"]);
        assert_eq!(rows[2], vec!["CPC", "12.5", ""]);
        // Range is rectangular, missing cells come back empty
        assert_eq!(rows[3], vec!["CPM", "7", ""]);
    }

    #[test]
    fn test_error_cell_falls_back_to_lenient() {
        let range = sheet(&[
            &[text("精査軸"), text("精査ポイント")],
            &[text("CPA"), Data::Error(CellErrorType::Div0)],
        ]);

        let rows = WorkbookReader::new().rows_from_range(&range).unwrap();
        assert_eq!(rows[1], vec!["CPA", ""]);
    }

    #[test]
    fn test_strict_only_chain_fails_on_error_cell() {
        let range = sheet(&[&[text("a")], &[Data::Error(CellErrorType::Ref)]]);

        let err = WorkbookReader::with_strategies(vec![CellStrategy::Strict])
            .rows_from_range(&range)
            .unwrap_err();
        match err {
            AppError::ParseError(msg) => {
                assert!(msg.starts_with("Error parsing Excel file"));
                assert!(msg.contains("A2"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_reference_is_sheet_absolute() {
        // Used area B3:C4
        let mut range = Range::new((2, 1), (3, 2));
        range.set_value((2, 1), text("精査軸"));
        range.set_value((2, 2), text("精査ポイント"));
        range.set_value((3, 1), text("CPA"));
        range.set_value((3, 2), Data::Error(CellErrorType::Div0));

        let err = WorkbookReader::with_strategies(vec![CellStrategy::Strict])
            .rows_from_range(&range)
            .unwrap_err();
        match err {
            AppError::ParseError(msg) => assert!(msg.contains("Cell C4"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }

        let rows = WorkbookReader::new().rows_from_range(&range).unwrap();
        assert_eq!(rows[1], vec!["CPA", ""]);
    }

    #[test]
    fn test_garbage_bytes_are_a_parse_error() {
        let err = WorkbookReader::new().read_rows(b"definitely not a workbook").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference(0, 0), "A1");
        assert_eq!(cell_reference(9, 25), "Z10");
        assert_eq!(cell_reference(1, 26), "AA2");
    }
}
