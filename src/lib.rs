mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::run;
pub use application::{BulkUploadOptions, BulkUploadUseCase};
pub use application::use_cases::bulk_validation::{validate_records, validator_for, SchemaValidator};
pub use application::use_cases::preview::build_preview;
pub use application::use_cases::row_mapper::to_records;
pub use domain::app_config::AppConfig;
pub use domain::error::{AppError, Result};
pub use infrastructure::backend_client::{BulkSettingGateway, HttpBulkSettingClient};
pub use infrastructure::config::ConfigService;
pub use infrastructure::spreadsheet::{read_and_parse_file, FileReader};
