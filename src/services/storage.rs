use crate::utils::validation::is_plain_file_name;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// An opened staged file, ready to be streamed
pub struct StagedObject {
    pub file: fs::File,
    pub size: u64,
}

#[async_trait]
pub trait StagingStore: Send + Sync {
    /// Location shown in logs and health output
    fn root(&self) -> &Path;

    /// Creates the staging area if needed. Idempotent.
    async fn ensure_ready(&self) -> Result<()>;

    /// Copies `source` into the staging area as `staged_name`, replacing any
    /// previous file with that name. Returns the number of bytes copied.
    async fn stage_copy(&self, source: &Path, staged_name: &str) -> Result<u64>;

    /// Opens a staged file. `Ok(None)` when no regular file by that name exists.
    async fn open(&self, staged_name: &str) -> Result<Option<StagedObject>>;

    /// Names of staged files that start with `base_name` followed by a dot
    async fn list_staged(&self, base_name: &str) -> Result<Vec<String>>;

    /// Removes staged files for `base_name` other than `keep`. Returns how many were removed.
    async fn remove_stale(&self, base_name: &str, keep: &str) -> Result<usize>;
}

/// Staging area on the local filesystem
pub struct LocalStagingStore {
    root: PathBuf,
}

impl LocalStagingStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn temp_path(&self, staged_name: &str) -> PathBuf {
        self.root
            .join(format!(".{}.{}.tmp", staged_name, Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl StagingStore for LocalStagingStore {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn ensure_ready(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("failed to create staging directory {}", self.root.display()))
    }

    async fn stage_copy(&self, source: &Path, staged_name: &str) -> Result<u64> {
        if !is_plain_file_name(staged_name) {
            anyhow::bail!("refusing to stage under invalid name {:?}", staged_name);
        }

        self.ensure_ready().await?;

        let target = self.root.join(staged_name);
        let temp = self.temp_path(staged_name);

        // Copy beside the target, then rename over it so readers never see a partial file.
        let copied = match fs::copy(source, &temp).await {
            Ok(n) => n,
            Err(e) => {
                let _ = fs::remove_file(&temp).await;
                return Err(e).with_context(|| {
                    format!("failed to copy {} into staging", source.display())
                });
            }
        };

        if let Err(e) = fs::rename(&temp, &target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e).with_context(|| format!("failed to replace {}", target.display()));
        }

        Ok(copied)
    }

    async fn open(&self, staged_name: &str) -> Result<Option<StagedObject>> {
        if !is_plain_file_name(staged_name) {
            return Ok(None);
        }

        let path = self.root.join(staged_name);
        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to open {}", path.display()));
            }
        };

        let metadata = file
            .metadata()
            .await
            .with_context(|| format!("failed to stat {}", path.display()))?;

        if !metadata.is_file() {
            return Ok(None);
        }

        Ok(Some(StagedObject {
            file,
            size: metadata.len(),
        }))
    }

    async fn list_staged(&self, base_name: &str) -> Result<Vec<String>> {
        let prefix = format!("{}.", base_name);
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to list {}", self.root.display()));
            }
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !name.starts_with(&prefix) {
                continue;
            }
            if entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    async fn remove_stale(&self, base_name: &str, keep: &str) -> Result<usize> {
        let mut removed = 0;
        for name in self.list_staged(base_name).await? {
            if name == keep {
                continue;
            }
            match fs::remove_file(self.root.join(&name)).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("failed to remove stale {}", name));
                }
            }
        }
        Ok(removed)
    }
}
