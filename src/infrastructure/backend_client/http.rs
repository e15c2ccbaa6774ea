use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{error, info};
use url::Url;

use super::BulkSettingGateway;
use crate::domain::app_config::AppConfig;
use crate::domain::bulk_upload::{
    FileUploadResponse, TemplateDownloadParams, TemplateFile, TemplateKind, UploadFile,
    ValidationError,
};
use crate::domain::error::{AppError, Result};

static FILENAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename[^;=\n]*=((['"]).*?['"]|[^;\n]*)"#).unwrap());

const UPLOAD_PATH: &str = "bulk-setting/upload/";
const TEMPLATE_PATH: &str = "bulk-setting/template/download/";

/// Error body shape returned by the backend on failure.
#[derive(Debug, Default, Deserialize)]
struct BackendErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<Vec<ValidationError>>,
}

pub struct HttpBulkSettingClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBulkSettingClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.api_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::ConfigError(format!("Invalid API URL: {}", e)))
    }
}

/// Parse the base URL so that `join` appends to its path instead of replacing
/// the last segment.
fn parse_base_url(api_url: &str) -> Result<Url> {
    let normalized = if api_url.ends_with('/') {
        api_url.to_string()
    } else {
        format!("{}/", api_url)
    };
    Url::parse(&normalized).map_err(|e| AppError::ConfigError(format!("Invalid API URL: {}", e)))
}

/// Filename from a `Content-Disposition` header value, quotes stripped.
pub fn filename_from_content_disposition(value: &str) -> Option<String> {
    let captures = FILENAME_PATTERN.captures(value)?;
    let filename = captures.get(1)?.as_str().replace(['"', '\''], "");
    let filename = filename.trim();
    if filename.is_empty() {
        None
    } else {
        Some(filename.to_string())
    }
}

/// Map a non-success upload status and body to the errors shown to the user.
fn rejected_upload(status: StatusCode, body: BackendErrorBody) -> FileUploadResponse {
    if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
        return FileUploadResponse::rejected(errors);
    }

    let message = match status {
        StatusCode::BAD_REQUEST => format!(
            "Validation error: {}",
            body.message
                .unwrap_or_else(|| "Invalid file format or content".to_string())
        ),
        StatusCode::UNAUTHORIZED => "Unauthorized: Authentication required".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR => format!(
            "Server error: {}",
            body.message
                .unwrap_or_else(|| "Could not upload file: Access Denied".to_string())
        ),
        _ => format!(
            "Upload failed: {}",
            body.message
                .unwrap_or_else(|| "Unknown error occurred".to_string())
        ),
    };

    FileUploadResponse {
        success: false,
        errors: None,
        message: Some(message),
    }
}

#[async_trait]
impl BulkSettingGateway for HttpBulkSettingClient {
    async fn upload(&self, file: &UploadFile, kind: TemplateKind) -> Result<FileUploadResponse> {
        let url = self.endpoint(UPLOAD_PATH)?;

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(file.mime_type()?)
            .map_err(|e| AppError::ValidationError(format!("Invalid file content type: {}", e)))?;
        let form = Form::new()
            .part("file", part)
            .text("bulk_type", kind.bulk_type().as_str());

        info!(
            %url,
            file = %file.name,
            bytes = file.size(),
            declared_type = ?file.content_type,
            bulk_type = kind.bulk_type().as_str(),
            "Uploading bulk settings"
        );

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Upload request failed: {}", e)))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            error!(status = status.as_u16(), body = %truncate(&text, 200), "File upload failed");
            let body = serde_json::from_str::<BackendErrorBody>(&text).unwrap_or_default();
            return Ok(rejected_upload(status, body));
        }

        info!(status = status.as_u16(), "File uploaded");
        Ok(FileUploadResponse::succeeded("File uploaded successfully"))
    }

    async fn download_template(&self, params: &TemplateDownloadParams) -> Result<TemplateFile> {
        if params.account_id.trim().is_empty() {
            return Err(AppError::ValidationError("Account ID is required".to_string()));
        }

        let mut url = self.endpoint(TEMPLATE_PATH)?;
        url.query_pairs_mut()
            .append_pair("bulk_type", params.template_kind.bulk_type().as_str())
            .append_pair("account_id", params.account_id.trim());

        info!(%url, "Downloading template");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Template request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %truncate(&text, 200), "Template download failed");
            return Err(AppError::TransportError(format!(
                "Failed to download template: {}",
                status.canonical_reason().unwrap_or("Unknown status")
            )));
        }

        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| params.fallback_filename());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::TransportError(format!("Failed to read template: {}", e)))?;

        Ok(TemplateFile {
            filename,
            bytes: bytes.to_vec(),
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}... [truncated]", head)
    }
}
