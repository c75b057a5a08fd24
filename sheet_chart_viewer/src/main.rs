/*
Author      : Seunghwan Shin
Create date : 2025-10-00
Description : Uploads a spreadsheet (xlsx/xls/csv), pulls out its Category/Value
              columns and renders bar, line, pie and scatter charts as HTML documents.

History     : 2025-10-00 Seunghwan Shin       # [v.1.0.0] first create
*/

mod common;
mod external_deps;
mod prelude;
use common::*;

mod env_configuration;

mod errors;

mod enums;

mod dto;

mod traits;

mod model;
use model::configs::{chart_config::*, server_config::*, storage_config::*, total_config::*};

mod utils_modules;
use utils_modules::logger_utils::*;

mod service;
use service::{
    chart_service_impl::*, cleanup_service_impl::*, column_service_impl::*, sheet_service_impl::*,
    upload_service_impl::*,
};

mod controller;
use controller::{http_router::*, main_controller::*};

#[tokio::main]
async fn main() {
    /* Global logger and environment */
    dotenv().ok();
    let _logger_handle: LoggerHandle = set_global_logger();

    info!("Sheet chart viewer start!");

    let server_config: &ServerConfig = get_server_config_info();
    let storage_config: &StorageConfig = get_storage_config_info();
    let chart_config: &ChartConfig = get_chart_config_info();

    let chart_service: ChartServiceImpl = ChartServiceImpl::new(
        storage_config.chart_output_dir().clone(),
        (*chart_config.width(), *chart_config.height()),
        chart_config.html_template_dir(),
    )
    .unwrap_or_else(|e| {
        let err_msg: &str = "[main] An issue occurred while initializing chart_service.";
        error!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    /* Dependency injection */
    let main_controller: Arc<
        MainController<
            UploadServiceImpl,
            SheetServiceImpl,
            ColumnServiceImpl,
            ChartServiceImpl,
            CleanupServiceImpl,
        >,
    > = Arc::new(MainController::new(
        UploadServiceImpl::new(storage_config.staging_dir().clone()),
        SheetServiceImpl::new(),
        ColumnServiceImpl::new(
            chart_config.category_column().clone(),
            chart_config.value_column().clone(),
        ),
        chart_service,
        CleanupServiceImpl::new(storage_config.clone()),
        chart_config.html_template_dir().clone(),
    ));

    /* Periodic removal of expired upload and chart directories */
    let retention_controller = Arc::clone(&main_controller);
    let sweep_interval_sec: u64 = *storage_config.sweep_interval_sec();
    tokio::spawn(async move {
        retention_controller
            .retention_task(sweep_interval_sec)
            .await
    });

    let router = build_router(main_controller, *server_config.max_upload_bytes());

    let listener: tokio::net::TcpListener =
        tokio::net::TcpListener::bind(server_config.bind_addr().as_str())
            .await
            .unwrap_or_else(|e| {
                let err_msg: String = format!(
                    "[main] Failed to bind {}.",
                    server_config.bind_addr()
                );
                error!("{} {:?}", err_msg, e);
                panic!("{} {:?}", err_msg, e)
            });

    info!("Listening on {}", server_config.bind_addr());

    if let Err(e) = axum::serve(listener, router).await {
        error!("[main] Server stopped with an error: {:?}", e);
    }
}
