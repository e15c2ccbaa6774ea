use crate::domain::bulk_upload::{MappedRecord, ParsedTable};

/// Key every data row by its header text. Cells missing from short rows read
/// as `""`; cells beyond the header row are dropped.
pub fn to_records(table: &ParsedTable) -> Vec<MappedRecord> {
    table
        .rows
        .iter()
        .map(|row| {
            table
                .headers
                .iter()
                .enumerate()
                .map(|(idx, header)| {
                    let value = row.get(idx).map(String::as_str).unwrap_or("");
                    (header.as_str(), value)
                })
                .collect::<MappedRecord>()
        })
        .collect()
}
