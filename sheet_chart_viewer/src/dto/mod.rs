pub mod chart_document;
pub mod staged_upload;
pub mod upload_file;
pub mod visualization_result;
