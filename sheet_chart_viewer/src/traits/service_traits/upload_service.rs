use crate::common::*;

use crate::dto::{staged_upload::*, upload_file::*};
use crate::enums::sheet_format::*;
use crate::errors::viewer_error::*;

#[async_trait]
pub trait UploadService: Send + Sync {
    #[doc = "
        Checks the filename and extension. Must not touch the file system.
        # Arguments
        * `upload` - the submitted file
        # Returns
        * the detected `SheetFormat`
    "]
    fn validate_upload(&self, upload: &UploadFile) -> Result<SheetFormat, ViewerError>;

    #[doc = "
        Writes a validated upload into its request-scoped staging directory.
        The file handle is closed before this returns.
    "]
    async fn stage_upload(
        &self,
        request_id: Uuid,
        upload: &UploadFile,
        format: SheetFormat,
    ) -> Result<StagedUpload, ViewerError>;
}
