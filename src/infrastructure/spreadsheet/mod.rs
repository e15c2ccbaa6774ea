// ============================================================
// SPREADSHEET INFRASTRUCTURE LAYER
// ============================================================
// CSV decoding, workbook decoding and table normalization

mod csv_reader;
mod workbook_reader;
mod file_reader;

pub use csv_reader::CsvReader;
pub use workbook_reader::{CellStrategy, WorkbookReader};
pub use file_reader::{read_and_parse_file, FileReader};
