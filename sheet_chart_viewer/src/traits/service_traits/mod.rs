pub mod chart_service;
pub mod cleanup_service;
pub mod column_service;
pub mod sheet_service;
pub mod upload_service;
