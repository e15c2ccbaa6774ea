use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct AppConfig {
    /// Base URL of the settings backend (`/bulk-setting/...` is appended)
    #[validate(url)]
    pub api_url: String,
    #[validate(length(min = 1))]
    pub listen_addr: String,
    #[validate(range(min = 1))]
    pub max_upload_bytes: usize,
    #[validate(range(min = 1))]
    pub preview_rows: usize,
    #[validate(range(min = 1, max = 600))]
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".to_string(),
            listen_addr: "127.0.0.1:8787".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

/// "File too large. Maximum size is 5MB." Fractional limits show one decimal.
pub fn file_too_large_message(max_upload_bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    let size = if max_upload_bytes % MIB == 0 {
        (max_upload_bytes / MIB).to_string()
    } else {
        format!("{:.1}", max_upload_bytes as f64 / MIB as f64)
    };
    format!("File too large. Maximum size is {}MB.", size)
}
