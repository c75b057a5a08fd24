use crate::common::*;

use crate::dto::staged_upload::*;
use crate::errors::viewer_error::*;
use crate::model::table::data_table::*;

#[async_trait]
pub trait SheetService: Send + Sync {
    async fn load_table(&self, staged: &StagedUpload) -> Result<DataTable, ViewerError>;
}
