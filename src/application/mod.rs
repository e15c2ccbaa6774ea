pub mod use_cases;

pub use use_cases::bulk_upload::{BulkUploadOptions, BulkUploadUseCase};
