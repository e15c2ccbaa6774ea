// ============================================================
// BULK UPLOAD DOMAIN LAYER
// ============================================================
// Core types and value objects for the bulk settings import
// No I/O, no async, no network

mod template_kind;
mod vocabulary;
mod schema;
mod parsed_table;
mod validation;
mod rows;
mod upload;

pub use template_kind::{BulkType, TemplateKind};
pub use vocabulary::{Genre, InspectionCondition, SwitchFlag};
pub use schema::{GenreKeywordField, KwFilteringField, TemplateSchema};
pub use parsed_table::{FilePreviewData, MappedRecord, ParsedTable};
pub use validation::{ValidRow, ValidationError, ValidationResult};
pub use rows::{GenreKeywordRow, KwFilteringRow};
pub use upload::{
    FileKind, FileUploadResponse, TemplateDownloadParams, TemplateFile, UploadFile,
    UploadSessionState,
};
