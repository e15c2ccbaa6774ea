// ============================================================
// BULK SETTINGS VALIDATION
// ============================================================
// Schema-specific validation of mapped spreadsheet records

mod genre_keyword;
mod kw_filtering;


use tracing::{debug, info};

use crate::domain::bulk_upload::{
    MappedRecord, TemplateKind, TemplateSchema, ValidRow, ValidationError, ValidationResult,
};

pub use genre_keyword::GenreKeywordValidator;
pub use kw_filtering::KwFilteringValidator;

pub const EMPTY_FILE_MESSAGE: &str = "File is empty or invalid format";

/// Header row counts as row 1, so data row `i` is shown as `i + 2`.
pub fn display_row(index: usize) -> usize {
    index + 2
}

/// Validates records against one template schema.
pub trait SchemaValidator {
    fn schema(&self) -> TemplateSchema;

    /// Check one record. `Err` carries every failing cell of the row.
    fn validate_row(
        &self,
        record: &MappedRecord,
        row: usize,
    ) -> std::result::Result<ValidRow, Vec<ValidationError>>;

    /// Empty input and missing headers each yield a single file-level error
    /// and skip cell checks. Otherwise rows are partitioned into valid rows
    /// and errors; a row with any error is left out of `data`.
    fn validate(&self, records: &[MappedRecord]) -> ValidationResult {
        let schema = self.schema();

        let Some(first) = records.first() else {
            return ValidationResult::file_error(EMPTY_FILE_MESSAGE);
        };

        let missing = schema.missing_headers(first);
        if !missing.is_empty() {
            info!(template = %schema.kind(), missing = ?missing, "Template header mismatch");
            return ValidationResult::file_error(format!(
                "File does not match the {} template. Missing columns: {}",
                schema.kind(),
                missing.join(", ")
            ));
        }

        let (valid_rows, errors) = records.iter().enumerate().fold(
            (Vec::new(), Vec::new()),
            |(mut valid_rows, mut errors), (index, record)| {
                match self.validate_row(record, display_row(index)) {
                    Ok(row) => valid_rows.push(row),
                    Err(row_errors) => errors.extend(row_errors),
                }
                (valid_rows, errors)
            },
        );

        debug!(
            template = %schema.kind(),
            rows = records.len(),
            valid = valid_rows.len(),
            errors = errors.len(),
            "Validated records"
        );

        ValidationResult::from_parts(errors, valid_rows)
    }
}

pub fn validator_for(kind: TemplateKind) -> Box<dyn SchemaValidator + Send + Sync> {
    match kind {
        TemplateKind::KwFiltering => Box::new(KwFilteringValidator),
        TemplateKind::GenreKeyword => Box::new(GenreKeywordValidator),
    }
}

/// Validate `records` with the validator of `kind`.
pub fn validate_records(kind: TemplateKind, records: &[MappedRecord]) -> ValidationResult {
    validator_for(kind).validate(records)
}

/// Trimmed cell value; whitespace-only cells count as empty.
pub(crate) fn cell<'a>(record: &'a MappedRecord, header: &str) -> &'a str {
    record.get(header).trim()
}
