use crate::common::*;

use tokio::io::AsyncWriteExt;

use crate::dto::{staged_upload::*, upload_file::*};
use crate::enums::sheet_format::*;
use crate::errors::viewer_error::*;
use crate::traits::service_traits::upload_service::*;

#[derive(Debug, Clone, new)]
pub struct UploadServiceImpl {
    staging_dir: PathBuf,
}

impl UploadServiceImpl {
    #[doc = r#"
        Reduces a client-supplied filename to its last path segment.

        Browsers on Windows may send `C:\Users\me\data.xlsx`, and a hostile client
        may send `../../etc/passwd`; neither may escape the request directory.
    "#]
    fn sanitize_filename(filename: &str) -> String {
        filename
            .trim()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_control())
            .collect()
    }
}

#[async_trait]
impl UploadService for UploadServiceImpl {
    fn validate_upload(&self, upload: &UploadFile) -> Result<SheetFormat, ViewerError> {
        let filename: String = Self::sanitize_filename(upload.filename());

        if filename.is_empty() {
            return Err(ViewerError::EmptyFilename);
        }

        SheetFormat::from_filename(&filename).ok_or_else(|| ViewerError::InvalidExtension {
            filename: upload.filename().to_string(),
        })
    }

    async fn stage_upload(
        &self,
        request_id: Uuid,
        upload: &UploadFile,
        format: SheetFormat,
    ) -> Result<StagedUpload, ViewerError> {
        let request_dir: PathBuf = self.staging_dir.join(request_id.to_string());
        let staged_path: PathBuf = request_dir.join(Self::sanitize_filename(upload.filename()));

        tokio::fs::create_dir_all(&request_dir)
            .await
            .map_err(|source| ViewerError::Staging {
                path: request_dir.clone(),
                source,
            })?;

        /* The handle is flushed and dropped at the end of this block, before anyone reads the file */
        {
            let to_staging_err = |source: std::io::Error| ViewerError::Staging {
                path: staged_path.clone(),
                source,
            };

            let mut file: tokio::fs::File = tokio::fs::File::create(&staged_path)
                .await
                .map_err(to_staging_err)?;
            file.write_all(upload.content())
                .await
                .map_err(to_staging_err)?;
            file.flush().await.map_err(to_staging_err)?;
        }

        info!(
            "[UploadServiceImpl->stage_upload] staged '{}' ({} bytes) at {:?}",
            upload.filename(),
            upload.content().len(),
            staged_path
        );

        Ok(StagedUpload::new(
            request_id,
            upload.filename().to_string(),
            format,
            staged_path,
        ))
    }
}
