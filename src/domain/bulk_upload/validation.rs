// ============================================================
// VALIDATION RESULT TYPES
// ============================================================
// Errors with row/column provenance and the validated row subset

use serde::{Deserialize, Serialize};

use super::{GenreKeywordRow, KwFilteringRow};
use crate::domain::error::AppError;

/// One reported problem. File-level errors carry neither `row` nor `column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// 1-based sheet row; the header is row 1, so the first data row is 2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,

    /// Column header as spelled in the template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    pub message: String,
}

impl ValidationError {
    pub fn file_level(message: impl Into<String>) -> Self {
        Self {
            row: None,
            column: None,
            message: message.into(),
        }
    }

    pub fn cell(row: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            column: Some(column.into()),
            message: message.into(),
        }
    }

    pub fn is_file_level(&self) -> bool {
        self.row.is_none() && self.column.is_none()
    }
}

impl From<AppError> for ValidationError {
    fn from(err: AppError) -> Self {
        ValidationError::file_level(err.to_string())
    }
}

/// A row that passed validation, in its typed form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidRow {
    KwFiltering(KwFilteringRow),
    GenreKeyword(GenreKeywordRow),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,

    /// Rows without any error; `None` when no row passed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ValidRow>>,
}

impl ValidationResult {
    pub fn file_error(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![ValidationError::file_level(message)],
            data: None,
        }
    }

    pub fn from_parts(errors: Vec<ValidationError>, valid_rows: Vec<ValidRow>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            data: if valid_rows.is_empty() {
                None
            } else {
                Some(valid_rows)
            },
        }
    }

    pub fn valid_row_count(&self) -> usize {
        self.data.as_ref().map(Vec::len).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_level_error_serializes_without_location() {
        let json = serde_json::to_value(ValidationError::file_level("Empty file")).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Empty file" }));
    }

    #[test]
    fn test_cell_error_serializes_location() {
        let json = serde_json::to_value(ValidationError::cell(3, "精査軸", "bad")).unwrap();
        assert_eq!(json["row"], 3);
        assert_eq!(json["column"], "精査軸");
    }

    #[test]
    fn test_backend_error_list_deserializes() {
        let errors: Vec<ValidationError> =
            serde_json::from_str(r#"[{"row":5,"column":"入稿フラグ","message":"x"},{"message":"y"}]"#)
                .unwrap();
        assert_eq!(errors[0].row, Some(5));
        assert!(errors[1].is_file_level());
    }

    #[test]
    fn test_from_parts_without_rows_has_no_data() {
        let result = ValidationResult::from_parts(vec![ValidationError::cell(2, "a", "b")], Vec::new());
        assert!(!result.is_valid);
        assert!(result.data.is_none());
        assert_eq!(result.valid_row_count(), 0);
    }
}
