use std::{fmt, sync::Arc};

use glasspane_core::appearance::PendingExtraction;
use glasspane_core::dashboard::Dashboard;
use glasspane_core::search::SearchEngines;
use glasspane_core::storage::DashboardStorage;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::debug;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Mutex<Dashboard>>,
    pub storage: Arc<dyn DashboardStorage>,
    pub engines: Arc<SearchEngines>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(dashboard: Dashboard, storage: Arc<dyn DashboardStorage>) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
            storage,
            engines: Arc::new(SearchEngines::default()),
        }
    }

    /// Run an extraction off the request path and apply its outcome once it
    /// finishes. The handle resolves to whether the color was adopted.
    pub fn spawn_extraction(&self, pending: PendingExtraction) -> JoinHandle<bool> {
        let dashboard = Arc::clone(&self.dashboard);
        tokio::spawn(async move {
            let sequence = pending.sequence();
            let outcome = pending.run().await;
            let applied = dashboard.lock().await.apply_extraction(outcome).await;
            debug!(sequence, applied, "color extraction finished");
            applied
        })
    }
}
