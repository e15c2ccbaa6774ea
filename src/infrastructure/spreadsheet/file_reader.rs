// ============================================================
// FILE READER
// ============================================================
// Dispatch by extension and normalize into a ParsedTable

use tracing::info;

use super::{CsvReader, WorkbookReader};
use crate::domain::bulk_upload::{FileKind, ParsedTable, UploadFile};
use crate::domain::error::Result;

#[derive(Default)]
pub struct FileReader {
    csv: CsvReader,
    workbook: WorkbookReader,
}

impl FileReader {
    /// Read a csv/xls/xlsx file. Fails with `UnsupportedFileType` for any
    /// other extension and `EmptyFile` when nothing is left after normalization.
    pub fn read_and_parse_file(&self, file: &UploadFile) -> Result<ParsedTable> {
        let kind = file.kind()?;

        let raw_rows = match kind {
            FileKind::Csv => self.csv.read_rows(&file.bytes)?,
            FileKind::Xls | FileKind::Xlsx => self.workbook.read_rows(&file.bytes)?,
        };

        let table = ParsedTable::from_raw_rows(raw_rows)?;
        info!(
            file = %file.name,
            ?kind,
            columns = table.headers.len(),
            rows = table.total_rows,
            "Parsed upload file"
        );

        Ok(table)
    }
}

/// Read with the default CSV and workbook readers.
pub fn read_and_parse_file(file: &UploadFile) -> Result<ParsedTable> {
    FileReader::default().read_and_parse_file(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use encoding_rs::SHIFT_JIS;

    fn csv_file(name: &str, text: &str) -> UploadFile {
        let (bytes, _, _) = SHIFT_JIS.encode(text);
        UploadFile::new(name, bytes.into_owned())
    }

    #[test]
    fn test_reads_csv_into_table() {
        let file = csv_file("rules.csv", "精査軸,休日実行\nCPA,ON\n,\nCPC,OFF\n");
        let table = read_and_parse_file(&file).unwrap();

        assert_eq!(table.headers, vec!["精査軸", "休日実行"]);
        assert_eq!(table.total_rows, 2);
        assert_eq!(table.rows[1], vec!["CPC", "OFF"]);
    }

    #[test]
    fn test_header_only_csv() {
        let table = read_and_parse_file(&csv_file("rules.csv", "精査軸,休日実行\n")).unwrap();
        assert_eq!(table.total_rows, 0);
    }

    #[test]
    fn test_empty_csv_is_empty_file() {
        let err = read_and_parse_file(&UploadFile::new("rules.csv", Vec::new())).unwrap_err();
        assert_eq!(err, AppError::EmptyFile);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = read_and_parse_file(&UploadFile::new("rules.txt", b"a,b".to_vec())).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFileType(_)));
    }

    #[test]
    fn test_corrupt_workbook() {
        let err = read_and_parse_file(&UploadFile::new("rules.xlsx", b"a,b".to_vec())).unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }
}
