use crate::config::StagingConfig;
use crate::services::storage::{StagedObject, StagingStore};
use crate::utils::validation::{PcbFileInfo, inspect_pcb_path};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum StagingError {
    #[error("No file path provided")]
    MissingPath,

    #[error("Invalid PCB file path or file does not exist")]
    InvalidTarget { path: String },

    #[error("File not found: {0}")]
    NotStaged(String),

    #[error("Staging failure: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Result of a successful staging request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub filename: String,
    pub original_path: String,
    pub url: String,
    pub size: u64,
}

/// Validates caller paths and keeps the single "current" PCB in the staging area.
///
/// Stages are serialized: the copy, rename and stale cleanup of one request
/// finish before the next begins, so the last writer wins and exactly one
/// staged file survives. Each copy lands under a temporary name and is renamed
/// into place, so readers see either the previous or the new file in full.
pub struct PcbStager {
    config: StagingConfig,
    store: Arc<dyn StagingStore>,
    stage_lock: Mutex<()>,
}

impl PcbStager {
    pub fn new(config: StagingConfig, store: Arc<dyn StagingStore>) -> Self {
        Self {
            config,
            store,
            stage_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StagingConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn StagingStore> {
        &self.store
    }

    /// Fail-closed path check; `None` means invalid for any reason.
    pub async fn validate(&self, file_path: &str) -> Option<PcbFileInfo> {
        inspect_pcb_path(file_path, &self.config).await
    }

    /// Staged name for a validated file: base name plus the source suffix
    pub fn staged_name_for(&self, info: &PcbFileInfo) -> String {
        format!("{}{}", self.config.staged_base_name, info.extension)
    }

    pub fn url_for(staged_name: &str) -> String {
        format!("/pcb/{}", staged_name)
    }

    /// Copies the file at `file_path` into the staging area, replacing whatever
    /// was staged before.
    pub async fn stage(&self, file_path: &str) -> Result<StagedFile, StagingError> {
        if file_path.is_empty() {
            return Err(StagingError::MissingPath);
        }

        let info = self.validate(file_path).await.ok_or_else(|| {
            warn!("Rejected PCB path: {:?}", file_path);
            StagingError::InvalidTarget {
                path: file_path.to_string(),
            }
        })?;

        let filename = self.staged_name_for(&info);

        let _guard = self.stage_lock.lock().await;

        // The source may change or vanish between the check above and this copy.
        let size = self
            .store
            .stage_copy(Path::new(file_path), &filename)
            .await
            .map_err(|e| {
                error!("Failed to stage {:?}: {:#}", file_path, e);
                StagingError::Storage(e)
            })?;

        match self
            .store
            .remove_stale(&self.config.staged_base_name, &filename)
            .await
        {
            Ok(0) => {}
            Ok(n) => info!("🧹 Removed {} previously staged file(s)", n),
            Err(e) => warn!("Failed to clear previously staged files: {:#}", e),
        }

        info!(
            "📌 Staged {} -> {} ({} bytes)",
            file_path, filename, size
        );

        Ok(StagedFile {
            url: Self::url_for(&filename),
            filename,
            original_path: file_path.to_string(),
            size,
        })
    }

    /// Opens a staged file for serving. Anything that is not a readable,
    /// regular staged file is reported as not staged.
    pub async fn open_staged(&self, filename: &str) -> Result<StagedObject, StagingError> {
        match self.store.open(filename).await {
            Ok(Some(staged)) => Ok(staged),
            Ok(None) => Err(StagingError::NotStaged(filename.to_string())),
            Err(e) => {
                warn!("Failed to open staged file {:?}: {:#}", filename, e);
                Err(StagingError::NotStaged(filename.to_string()))
            }
        }
    }

    /// Names currently present in the staging area
    pub async fn staged_files(&self) -> Result<Vec<String>, StagingError> {
        Ok(self
            .store
            .list_staged(&self.config.staged_base_name)
            .await?)
    }
}
