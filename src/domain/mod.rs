pub mod app_config;
pub mod error;

// Bulk settings import module
pub mod bulk_upload;
