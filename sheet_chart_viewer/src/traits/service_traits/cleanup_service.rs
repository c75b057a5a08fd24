use crate::common::*;

use crate::dto::staged_upload::*;
use crate::errors::viewer_error::*;

#[async_trait]
pub trait CleanupService: Send + Sync {
    #[doc = "Deletes the staged input (and its now empty request directory) after a successful run"]
    async fn remove_staged(&self, staged: &StagedUpload) -> Result<(), ViewerError>;

    #[doc = "Failure path: keeps the staged input on disk unless configured otherwise"]
    async fn release_failed(&self, staged: &StagedUpload);

    #[doc = r#"
        Deletes request directories older than the retention window and returns how
        many were removed. Failures are logged per directory and never abort the sweep.
    "#]
    async fn sweep_expired(&self) -> usize;
}
