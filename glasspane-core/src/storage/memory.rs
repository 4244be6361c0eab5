use async_trait::async_trait;
use glasspane_model::{Background, Category, DashboardSnapshot, PreferencesPatch};
use tokio::sync::RwLock;
use tracing::trace;

use super::DashboardStorage;
use crate::error::Result;

/// Keeps the dashboard document in process memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: RwLock<DashboardSnapshot>,
}

impl MemoryStorage {
    pub fn new(snapshot: DashboardSnapshot) -> Self {
        Self {
            document: RwLock::new(snapshot),
        }
    }

    /// Starts out with the starter content
    pub fn seeded() -> Self {
        Self::new(DashboardSnapshot::seed())
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl DashboardStorage for MemoryStorage {
    async fn fetch_all(&self) -> Result<DashboardSnapshot> {
        Ok(self.snapshot().await)
    }

    async fn set_background(&self, background: Background) -> Result<()> {
        self.document.write().await.background = background;
        Ok(())
    }

    async fn save_preferences(
        &self,
        patch: PreferencesPatch,
        immediate: bool,
    ) -> Result<()> {
        trace!(immediate, "saving preferences in memory");
        patch.apply_to(&mut self.document.write().await.prefs);
        Ok(())
    }

    async fn save_categories(&self, categories: Vec<Category>) -> Result<()> {
        self.document.write().await.categories = categories;
        Ok(())
    }
}
