pub mod chart_service_impl;
pub mod cleanup_service_impl;
pub mod column_service_impl;
pub mod sheet_service_impl;
pub mod upload_service_impl;
