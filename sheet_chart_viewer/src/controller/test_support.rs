use crate::common::*;

use crate::controller::main_controller::*;
use crate::model::configs::storage_config::*;
use crate::service::{
    chart_service_impl::*, cleanup_service_impl::*, column_service_impl::*, sheet_service_impl::*,
    upload_service_impl::*,
};

pub(crate) type TestController = MainController<
    UploadServiceImpl,
    SheetServiceImpl,
    ColumnServiceImpl,
    ChartServiceImpl,
    CleanupServiceImpl,
>;

pub(crate) fn template_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("html")
}

pub(crate) fn staging_dir(root: &Path) -> PathBuf {
    root.join("uploads")
}

pub(crate) fn chart_dir(root: &Path) -> PathBuf {
    root.join("charts")
}

#[doc = "Wires the real services against throw-away directories under `root`"]
pub(crate) fn build_test_controller(root: &Path, remove_staged_on_failure: bool) -> TestController {
    let storage: StorageConfig = StorageConfig::new(
        staging_dir(root),
        chart_dir(root),
        remove_staged_on_failure,
        3600,
        300,
    );

    MainController::new(
        UploadServiceImpl::new(staging_dir(root)),
        SheetServiceImpl::new(),
        ColumnServiceImpl::new("Category".to_string(), "Value".to_string()),
        ChartServiceImpl::new(chart_dir(root), (800, 400), &template_dir())
            .expect("chart document template"),
        CleanupServiceImpl::new(storage),
        template_dir(),
    )
}
