pub mod http;

use async_trait::async_trait;

use crate::domain::bulk_upload::{
    FileUploadResponse, TemplateDownloadParams, TemplateFile, TemplateKind, UploadFile,
};
use crate::domain::error::Result;

pub use http::HttpBulkSettingClient;

/// Settings backend that stores bulk uploads and generates templates.
#[async_trait]
pub trait BulkSettingGateway {
    /// Submit the unmodified file. `Ok` carries both accepted and rejected
    /// outcomes; `Err` is reserved for transport failures.
    async fn upload(&self, file: &UploadFile, kind: TemplateKind) -> Result<FileUploadResponse>;

    async fn download_template(&self, params: &TemplateDownloadParams) -> Result<TemplateFile>;
}
