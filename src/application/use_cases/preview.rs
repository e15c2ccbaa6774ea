use crate::domain::app_config::DEFAULT_PREVIEW_ROWS;
use crate::domain::bulk_upload::{FilePreviewData, ParsedTable};

/// First `max_rows` rows of `table`. `total_rows` keeps the full count so
/// callers can show "first 5 of 37".
pub fn build_preview(table: &ParsedTable, max_rows: usize) -> FilePreviewData {
    FilePreviewData {
        headers: table.headers.clone(),
        rows: table.rows.iter().take(max_rows).cloned().collect(),
        total_rows: table.total_rows,
    }
}

pub fn build_default_preview(table: &ParsedTable) -> FilePreviewData {
    build_preview(table, DEFAULT_PREVIEW_ROWS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::spreadsheet::WorkbookReader;
    use calamine::{Data, Range};

    fn table_with_rows(count: usize) -> ParsedTable {
        let rows: Vec<Vec<String>> = (0..count).map(|i| vec![i.to_string()]).collect();
        ParsedTable {
            headers: vec!["精査軸".to_string()],
            total_rows: rows.len(),
            rows,
        }
    }

    #[test]
    fn test_preview_truncates_but_keeps_total() {
        let preview = build_preview(&table_with_rows(37), 5);
        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.total_rows, 37);
        assert_eq!(preview.rows[4], vec!["4"]);
    }

    #[test]
    fn test_preview_of_small_table() {
        let preview = build_default_preview(&table_with_rows(2));
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.total_rows, 2);

        let preview = build_preview(&table_with_rows(0), 5);
        assert!(preview.rows.is_empty());
        assert_eq!(preview.headers, vec!["精査軸"]);
    }

    #[test]
    fn test_preview_of_ten_row_sheet() {
        let mut range = Range::new((0, 0), (10, 1));
        range.set_value((0, 0), Data::String("精査軸".to_string()));
        range.set_value((0, 1), Data::String("精査ポイント".to_string()));
        for row in 1..=10u32 {
            range.set_value((row, 0), Data::String("CPA".to_string()));
            range.set_value((row, 1), Data::Int(row as i64));
        }

        let raw = WorkbookReader::new().rows_from_range(&range).unwrap();
        let table = ParsedTable::from_raw_rows(raw).unwrap();
        let preview = build_preview(&table, 5);

        assert_eq!(preview.rows.len(), 5);
        assert_eq!(preview.total_rows, 10);
    }
}
