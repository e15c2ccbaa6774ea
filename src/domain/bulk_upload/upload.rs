// ============================================================
// UPLOAD TYPES
// ============================================================
// File handles, backend DTOs and orchestrator session state

use serde::{Deserialize, Serialize};

use super::{FilePreviewData, TemplateKind, ValidationError};
use crate::domain::error::{AppError, Result};

/// Spreadsheet format, decided by file extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Csv,
    Xls,
    Xlsx,
}

impl FileKind {
    pub fn from_file_name(name: &str) -> Result<Self> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(FileKind::Csv),
            "xls" => Ok(FileKind::Xls),
            "xlsx" => Ok(FileKind::Xlsx),
            _ => Err(AppError::UnsupportedFileType(
                "Unsupported file type. Please upload CSV or Excel files.".to_string(),
            )),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            FileKind::Csv => "text/csv",
            FileKind::Xls => "application/vnd.ms-excel",
            FileKind::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

/// A user-selected file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn kind(&self) -> Result<FileKind> {
        FileKind::from_file_name(&self.name)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// MIME type implied by the extension. The declared `content_type` is
    /// not trusted; browsers label CSV files inconsistently.
    pub fn mime_type(&self) -> Result<&'static str> {
        Ok(self.kind()?.mime_type())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDownloadParams {
    pub account_id: String,
    #[serde(rename = "templateType")]
    pub template_kind: TemplateKind,
}

impl TemplateDownloadParams {
    pub fn new(account_id: impl Into<String>, template_kind: TemplateKind) -> Self {
        Self {
            account_id: account_id.into(),
            template_kind,
        }
    }

    pub fn fallback_filename(&self) -> String {
        format!("template_{}_{}.xlsx", self.template_kind, self.account_id)
    }
}

/// Template spreadsheet returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationError>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileUploadResponse {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            errors: None,
            message: Some(message.into()),
        }
    }

    pub fn rejected(errors: Vec<ValidationError>) -> Self {
        Self {
            success: false,
            errors: Some(errors),
            message: None,
        }
    }

    /// Errors to show for a failed upload: the structured list when present,
    /// otherwise one file-level error built from `message`.
    pub fn error_list(&self) -> Vec<ValidationError> {
        match &self.errors {
            Some(errors) if !errors.is_empty() => errors.clone(),
            _ => vec![ValidationError::file_level(
                self.message.clone().unwrap_or_else(|| "Upload failed".to_string()),
            )],
        }
    }
}

/// Session state owned by the upload orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSessionState {
    /// Preview parse or template download in flight
    pub is_loading: bool,
    pub is_uploading: bool,
    pub errors: Option<Vec<ValidationError>>,
    pub preview_data: Option<FilePreviewData>,
}

impl UploadSessionState {
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }
}
