pub mod chart_config;
pub mod server_config;
pub mod storage_config;
pub mod total_config;
