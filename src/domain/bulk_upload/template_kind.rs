// ============================================================
// TEMPLATE KIND
// ============================================================
// Which spreadsheet schema a file is validated against

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::AppError;

/// Spreadsheet schema selected by the caller. Never inferred from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    #[serde(rename = "kw-filtering")]
    KwFiltering,
    #[serde(rename = "genre-keyword")]
    GenreKeyword,
}

/// Discriminator the backend expects in the `bulk_type` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkType {
    Rule,
    Genre,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 2] = [TemplateKind::KwFiltering, TemplateKind::GenreKeyword];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::KwFiltering => "kw-filtering",
            TemplateKind::GenreKeyword => "genre-keyword",
        }
    }

    pub fn bulk_type(&self) -> BulkType {
        match self {
            TemplateKind::KwFiltering => BulkType::Rule,
            TemplateKind::GenreKeyword => BulkType::Genre,
        }
    }
}

impl BulkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkType::Rule => "rule",
            BulkType::Genre => "genre",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::ValidationError("Invalid template type".to_string()))
    }
}
