use crate::common::*;

use crate::dto::staged_upload::*;
use crate::errors::viewer_error::*;
use crate::model::configs::storage_config::*;
use crate::traits::service_traits::cleanup_service::*;
use crate::utils_modules::{io_utils::*, time_utils::*};

#[derive(Debug, Clone, new)]
pub struct CleanupServiceImpl {
    storage_config: StorageConfig,
}

impl CleanupServiceImpl {
    async fn is_expired_request_dir(
        &self,
        entry: &tokio::fs::DirEntry,
        now: SystemTime,
    ) -> std::io::Result<bool> {
        if Uuid::parse_str(&entry.file_name().to_string_lossy()).is_err() {
            return Ok(false);
        }

        let metadata: std::fs::Metadata = entry.metadata().await?;

        if !metadata.is_dir() {
            return Ok(false);
        }

        let modified: SystemTime = metadata.modified()?;

        Ok(elapsed_secs_since(modified, now) >= *self.storage_config.retention_sec())
    }

    #[doc = r#"
        Removes request directories directly under `root` whose modification time
        is at least `retention_sec` old. Only directories named by a request id
        (UUID) are considered; anything else in the root is left alone.
    "#]
    async fn sweep_root(&self, root: &Path, now: SystemTime) -> anyhow::Result<usize> {
        let mut entries: tokio::fs::ReadDir = match tokio::fs::read_dir(root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                return Err(anyhow!(
                    "[CleanupServiceImpl->sweep_root] Failed to read {:?}: {:?}",
                    root,
                    e
                ));
            }
        };

        let mut removed: usize = 0;

        loop {
            let entry: tokio::fs::DirEntry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    error!(
                        "[CleanupServiceImpl->sweep_root] Failed to list {:?}: {:?}",
                        root, e
                    );
                    break;
                }
            };

            match self.is_expired_request_dir(&entry, now).await {
                Ok(true) => {}
                Ok(false) => continue,
                /* removed concurrently, e.g. by a finishing request */
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    error!(
                        "[CleanupServiceImpl->sweep_root] Failed to inspect {:?}: {:?}",
                        entry.path(),
                        e
                    );
                    continue;
                }
            }

            match tokio::fs::remove_dir_all(entry.path()).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => error!(
                    "[CleanupServiceImpl->sweep_root] Failed to remove {:?}: {:?}",
                    entry.path(),
                    e
                ),
            }
        }

        Ok(removed)
    }
}

#[async_trait]
impl CleanupService for CleanupServiceImpl {
    async fn remove_staged(&self, staged: &StagedUpload) -> Result<(), ViewerError> {
        let path: &PathBuf = staged.staged_path();

        tokio::fs::remove_file(path)
            .await
            .map_err(|source| ViewerError::Cleanup {
                path: path.clone(),
                source,
            })?;

        if let Some(request_dir) = staged.request_dir() {
            remove_dir_if_empty(request_dir)
                .await
                .map_err(|source| ViewerError::Cleanup {
                    path: request_dir.to_path_buf(),
                    source,
                })?;
        }

        info!("[CleanupServiceImpl->remove_staged] removed {:?}", path);

        Ok(())
    }

    async fn release_failed(&self, staged: &StagedUpload) {
        if !*self.storage_config.remove_staged_on_failure() {
            warn!(
                "[CleanupServiceImpl->release_failed] keeping failed upload {:?} for the retention sweep",
                staged.staged_path()
            );
            return;
        }

        if let Err(e) = self.remove_staged(staged).await {
            error!("[CleanupServiceImpl->release_failed] {:?}", e);
        }
    }

    async fn sweep_expired(&self) -> usize {
        let now: SystemTime = SystemTime::now();
        let mut removed: usize = 0;

        /* One unreadable root must not stop the other from being swept */
        for root in [
            self.storage_config.staging_dir(),
            self.storage_config.chart_output_dir(),
        ] {
            match self.sweep_root(root, now).await {
                Ok(count) => removed += count,
                Err(e) => error!("[CleanupServiceImpl->sweep_expired] {:?}", e),
            }
        }

        if removed > 0 {
            info!(
                "[CleanupServiceImpl->sweep_expired] removed {} expired request directories",
                removed
            );
        }

        removed
    }
}
