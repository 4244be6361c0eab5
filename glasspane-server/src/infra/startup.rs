use std::sync::Arc;

use anyhow::Context;
use glasspane_core::appearance::AppearanceResolver;
use glasspane_core::config::DashboardConfig;
use glasspane_core::dashboard::Dashboard;
use glasspane_core::storage::{DashboardStorage, storage_from_config};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::app_state::AppState;

/// Wire storage, resolver and an unloaded dashboard together
pub fn bootstrap(config: DashboardConfig) -> anyhow::Result<AppState> {
    let storage = storage_from_config(&config.storage);
    bootstrap_with_storage(config, storage)
}

pub fn bootstrap_with_storage(
    config: DashboardConfig,
    storage: Arc<dyn DashboardStorage>,
) -> anyhow::Result<AppState> {
    let resolver = AppearanceResolver::from_config(&config.appearance)
        .context("failed to build image loader")?;

    let dashboard = Dashboard::from_config(&config, Arc::clone(&storage), resolver);

    match &config.storage.path {
        Some(path) => info!("dashboard data stored at {}", path.display()),
        None => info!("dashboard data kept in memory"),
    }

    Ok(AppState::new(dashboard, storage))
}

/// Load the dashboard in the background. Requests are answered with 503
/// until the fetched snapshot is installed. The dashboard lock is held only
/// for the install; storage and the initial color extraction run unlocked.
pub fn spawn_initial_load(state: &AppState) -> JoinHandle<()> {
    let state = state.clone();
    tokio::spawn(async move {
        let snapshot = Dashboard::fetch(state.storage.as_ref()).await;
        let (_, pending) = state.dashboard.lock().await.install(snapshot);

        if let Some(pending) = pending
            && let Err(e) = state.spawn_extraction(pending).await
        {
            warn!("initial color extraction task failed: {e}");
        }
    })
}
