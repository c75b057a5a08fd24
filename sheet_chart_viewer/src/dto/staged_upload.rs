use crate::common::*;

use crate::enums::sheet_format::*;

#[doc = "An upload persisted under `<staging_dir>/<request_id>/`"]
#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct StagedUpload {
    pub request_id: Uuid,
    pub original_filename: String,
    pub format: SheetFormat,
    pub staged_path: PathBuf,
}

impl StagedUpload {
    pub fn request_dir(&self) -> Option<&Path> {
        self.staged_path.parent()
    }
}
