//! Persistence contract for dashboard data and its implementations

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use glasspane_model::{Background, Category, DashboardSnapshot, PreferencesPatch};

use crate::config::StorageConfig;
use crate::error::Result;

pub mod file;
pub mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Backend the dashboard reads its state from and writes changes to.
///
/// Writes are best effort from the dashboard's point of view: failures are
/// logged by the caller and never roll back local state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardStorage: Send + Sync {
    /// Bulk fetch of everything needed to render
    async fn fetch_all(&self) -> Result<DashboardSnapshot>;

    async fn set_background(&self, background: Background) -> Result<()>;

    /// Merge `patch` into the stored preferences. `immediate` asks for the
    /// write to reach the backend now rather than being batched.
    async fn save_preferences(
        &self,
        patch: PreferencesPatch,
        immediate: bool,
    ) -> Result<()>;

    /// Replace the stored category tree
    async fn save_categories(&self, categories: Vec<Category>) -> Result<()>;

    /// Push out any batched writes
    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// File-backed storage when a path is configured, in-memory seed data
/// otherwise
pub fn storage_from_config(config: &StorageConfig) -> Arc<dyn DashboardStorage> {
    match &config.path {
        Some(path) => Arc::new(JsonFileStorage::new(
            path.clone(),
            Duration::from_millis(config.flush_delay_ms),
        )),
        None => Arc::new(MemoryStorage::seeded()),
    }
}
