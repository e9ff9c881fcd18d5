use crate::config::StagingConfig;
use crate::services::storage::{LocalStagingStore, StagingStore};
use std::sync::Arc;
use tracing::info;

pub async fn setup_storage(config: &StagingConfig) -> anyhow::Result<Arc<LocalStagingStore>> {
    let store = LocalStagingStore::new(&config.staging_dir);

    info!("📁 Staging directory: {}", config.staging_dir.display());
    store.ensure_ready().await?;

    let staged = store.list_staged(&config.staged_base_name).await?;
    if staged.is_empty() {
        info!("✅ Staging directory is ready (nothing staged)");
    } else {
        info!("✅ Staging directory is ready (current: {})", staged.join(", "));
    }

    Ok(Arc::new(store))
}
