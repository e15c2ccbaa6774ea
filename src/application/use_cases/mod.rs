pub mod bulk_upload;
pub mod bulk_validation;
pub mod preview;
pub mod row_mapper;
