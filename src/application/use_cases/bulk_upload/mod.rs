// ============================================================
// BULK UPLOAD USE CASE
// ============================================================
// Per-session coordinator: preview on select, validate before
// submit, submit to the backend, template download and reset

#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{error, info, warn};

use crate::application::use_cases::bulk_validation::validate_records;
use crate::application::use_cases::preview::build_preview;
use crate::application::use_cases::row_mapper::to_records;
use crate::domain::app_config::{
    file_too_large_message, AppConfig, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PREVIEW_ROWS,
};
use crate::domain::bulk_upload::{
    FileUploadResponse, ParsedTable, TemplateDownloadParams, TemplateFile, TemplateKind,
    UploadFile, UploadSessionState, ValidationError, ValidationResult,
};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::backend_client::BulkSettingGateway;
use crate::infrastructure::spreadsheet::FileReader;

pub const TEMPLATE_DOWNLOAD_FAILED: &str = "Failed to download template. Please try again.";

pub type SuccessCallback = Box<dyn Fn(Option<String>) + Send + Sync>;
pub type ErrorCallback = Box<dyn Fn(Vec<ValidationError>) + Send + Sync>;

pub struct BulkUploadOptions {
    pub on_success: Option<SuccessCallback>,
    pub on_error: Option<ErrorCallback>,
    pub preview_rows: usize,
    pub max_upload_bytes: usize,
}

impl Default for BulkUploadOptions {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl BulkUploadOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            preview_rows: config.preview_rows,
            max_upload_bytes: config.max_upload_bytes,
            ..Default::default()
        }
    }

    pub fn on_success(mut self, callback: impl Fn(Option<String>) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(Vec<ValidationError>) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }
}

pub struct BulkUploadUseCase {
    gateway: Arc<dyn BulkSettingGateway + Send + Sync>,
    options: BulkUploadOptions,
    state: Mutex<UploadSessionState>,
}

impl BulkUploadUseCase {
    pub fn new(gateway: Arc<dyn BulkSettingGateway + Send + Sync>, options: BulkUploadOptions) -> Self {
        Self {
            gateway,
            options,
            state: Mutex::new(UploadSessionState::default()),
        }
    }

    /// Snapshot of the current session state.
    pub fn state(&self) -> UploadSessionState {
        self.lock_state().clone()
    }

    /// Parse and validate `file` for display. Validation errors do not
    /// suppress the preview; a file that cannot be read yields one
    /// file-level error and no preview.
    pub async fn preview_file(&self, file: &UploadFile, kind: TemplateKind) {
        self.update(|state| {
            state.is_loading = true;
            state.errors = None;
            state.preview_data = None;
        });

        let outcome = self.run_pipeline(file, kind).await;

        self.update(|state| {
            match outcome {
                Ok((table, result)) => {
                    if !result.is_valid {
                        state.errors = Some(result.errors);
                    }
                    state.preview_data = Some(build_preview(&table, self.options.preview_rows));
                }
                Err(err) => {
                    warn!(file = %file.name, error = %err, "Preview failed");
                    state.errors = Some(vec![ValidationError::from(err)]);
                }
            }
            state.is_loading = false;
        });
    }

    /// Re-validate `file` and submit it when valid. An invalid file never
    /// reaches the gateway. Backend rejections surface like local errors.
    pub async fn upload_file(&self, file: &UploadFile, kind: TemplateKind) -> FileUploadResponse {
        self.update(|state| {
            state.is_uploading = true;
            state.errors = None;
        });

        let response = self.submit(file, kind).await;

        self.update(|state| state.is_uploading = false);
        response
    }

    async fn submit(&self, file: &UploadFile, kind: TemplateKind) -> FileUploadResponse {
        let result = match self.run_pipeline(file, kind).await {
            Ok((_, result)) => result,
            Err(err) => return self.fail(vec![ValidationError::from(err)]),
        };

        if !result.is_valid {
            info!(
                file = %file.name,
                template = %kind,
                errors = result.errors.len(),
                "Upload blocked by validation errors"
            );
            return self.fail(result.errors);
        }

        match self.gateway.upload(file, kind).await {
            Ok(response) if response.success => {
                info!(file = %file.name, template = %kind, "Upload accepted");
                if let Some(callback) = &self.options.on_success {
                    callback(response.message.clone());
                }
                response
            }
            Ok(response) => {
                warn!(file = %file.name, template = %kind, "Upload rejected by backend");
                self.fail(response.error_list())
            }
            Err(err) => {
                error!(file = %file.name, error = %err, "Upload request failed");
                self.fail(vec![ValidationError::file_level(err.to_string())])
            }
        }
    }

    /// Fetch the template for an account. Failures are reported through the
    /// session errors with a generic message.
    pub async fn download_template(&self, params: &TemplateDownloadParams) -> Option<TemplateFile> {
        self.update(|state| state.is_loading = true);

        let outcome = self.gateway.download_template(params).await;

        self.update(|state| state.is_loading = false);

        match outcome {
            Ok(template) => {
                info!(filename = %template.filename, bytes = template.bytes.len(), "Template downloaded");
                Some(template)
            }
            Err(err) => {
                error!(account_id = %params.account_id, error = %err, "Error downloading template");
                self.fail(vec![ValidationError::file_level(TEMPLATE_DOWNLOAD_FAILED)]);
                None
            }
        }
    }

    pub fn reset_errors(&self) {
        self.update(|state| state.errors = None);
    }

    /// Clear errors, preview and both in-flight flags in one step.
    pub fn reset_all(&self) {
        self.update(|state| *state = UploadSessionState::default());
    }

    /// read -> map -> validate, off the async executor.
    async fn run_pipeline(
        &self,
        file: &UploadFile,
        kind: TemplateKind,
    ) -> Result<(ParsedTable, ValidationResult)> {
        if file.size() > self.options.max_upload_bytes {
            return Err(AppError::ValidationError(file_too_large_message(
                self.options.max_upload_bytes,
            )));
        }

        let file = file.clone();
        tokio::task::spawn_blocking(move || {
            let table = FileReader::default().read_and_parse_file(&file)?;
            let result = validate_records(kind, &to_records(&table));
            Ok((table, result))
        })
        .await
        .map_err(|e| AppError::Internal(format!("File processing task failed: {}", e)))?
    }

    fn fail(&self, errors: Vec<ValidationError>) -> FileUploadResponse {
        self.update(|state| state.errors = Some(errors.clone()));
        if let Some(callback) = &self.options.on_error {
            callback(errors.clone());
        }
        FileUploadResponse::rejected(errors)
    }

    fn update(&self, f: impl FnOnce(&mut UploadSessionState)) {
        f(&mut self.lock_state());
    }

    fn lock_state(&self) -> MutexGuard<'_, UploadSessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
