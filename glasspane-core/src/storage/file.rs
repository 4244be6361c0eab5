//! Single JSON document on disk

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use glasspane_model::{Background, Category, DashboardSnapshot, PreferencesPatch};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::DashboardStorage;
use crate::error::Result;

#[derive(Debug, Default)]
struct FileState {
    document: Option<DashboardSnapshot>,
    dirty: bool,
    flush_scheduled: bool,
}

/// Stores the whole dashboard as one JSON file.
///
/// A missing file reads as the starter content. Non-immediate preference
/// writes are coalesced and hit the disk once `flush_delay` has passed
/// since the first of them; every other write goes out at once.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    flush_delay: Duration,
    state: Arc<Mutex<FileState>>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>, flush_delay: Duration) -> Self {
        Self {
            path: path.into(),
            flush_delay,
            state: Arc::new(Mutex::new(FileState::default())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(path: &Path) -> Result<DashboardSnapshot> {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let mut snapshot: DashboardSnapshot =
                    serde_json::from_slice(&bytes)?;
                snapshot.prefs.theme = snapshot.prefs.theme.normalized();
                Ok(snapshot)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no dashboard file yet, using starter content");
                Ok(DashboardSnapshot::seed())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(path: &Path, snapshot: &DashboardSnapshot) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(snapshot)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;

        debug!(path = %path.display(), "dashboard file written");
        Ok(())
    }

    /// Run `mutate` against the cached document, loading it first if needed
    async fn update<F>(&self, immediate: bool, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut DashboardSnapshot) + Send,
    {
        let mut state = self.state.lock().await;
        let document = match state.document.take() {
            Some(document) => document,
            None => Self::read_document(&self.path).await?,
        };
        let document = state.document.insert(document);
        mutate(document);
        state.dirty = true;

        if immediate && let Some(document) = state.document.as_ref() {
            let written = Self::write_document(&self.path, document).await;
            if written.is_ok() {
                state.dirty = false;
                return Ok(());
            }
            // Left dirty for the deferred flush to retry
            self.ensure_flush_scheduled(&mut state);
            return written;
        }

        self.ensure_flush_scheduled(&mut state);
        Ok(())
    }

    fn ensure_flush_scheduled(&self, state: &mut FileState) {
        if !state.flush_scheduled {
            state.flush_scheduled = true;
            self.schedule_flush();
        }
    }

    fn schedule_flush(&self) {
        let storage = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(storage.flush_delay).await;
            if let Err(e) = storage.flush_dirty(true).await {
                warn!(path = %storage.path.display(), "deferred dashboard write failed: {e}");
            }
        });
    }

    async fn flush_dirty(&self, from_timer: bool) -> Result<()> {
        let mut state = self.state.lock().await;
        if from_timer {
            state.flush_scheduled = false;
        }
        if !state.dirty {
            return Ok(());
        }
        if let Some(document) = state.document.as_ref() {
            Self::write_document(&self.path, document).await?;
        }
        state.dirty = false;
        Ok(())
    }
}

#[async_trait]
impl DashboardStorage for JsonFileStorage {
    async fn fetch_all(&self) -> Result<DashboardSnapshot> {
        let mut state = self.state.lock().await;
        if let Some(document) = state.document.as_ref() {
            return Ok(document.clone());
        }
        let document = Self::read_document(&self.path).await?;
        Ok(state.document.insert(document).clone())
    }

    async fn set_background(&self, background: Background) -> Result<()> {
        self.update(true, |doc| doc.background = background).await
    }

    async fn save_preferences(
        &self,
        patch: PreferencesPatch,
        immediate: bool,
    ) -> Result<()> {
        self.update(immediate, |doc| patch.apply_to(&mut doc.prefs)).await
    }

    async fn save_categories(&self, categories: Vec<Category>) -> Result<()> {
        self.update(true, |doc| doc.categories = categories).await
    }

    async fn flush(&self) -> Result<()> {
        self.flush_dirty(false).await
    }
}
