//! The single owner of dashboard state.
//!
//! [`Dashboard`] ties the navigation store, the appearance preferences, the
//! highlight tracker and the storage backend together. Local state is always
//! updated first; writes to storage are best effort and never roll it back.
//! Color extraction is handed out as a [`PendingExtraction`] so the caller can
//! run it without holding on to the dashboard, then feed the outcome back
//! through [`Dashboard::apply_extraction`].

use std::sync::Arc;

use glasspane_model::{
    Background, Bounds, Category, CategoryId, DashboardSnapshot, HexColor,
    HighlightGeometry, LayoutPreferences, PreferencesPatch, SubCategoryId,
    ThemeMode, UserPreferences, validate_tree,
};
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::appearance::{AppearanceResolver, ExtractionOutcome, PendingExtraction};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::navigation::{
    DisplayPolicy, HighlightTicket, HighlightTracker, HighlightTrigger,
    NavigationStore, SelectionPolicy,
};
use crate::storage::DashboardStorage;

pub mod view;

pub use view::{BackgroundView, DashboardView, DisplayCard, ThemeVariables};

/// Changes submitted from the appearance settings panel
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceUpdate {
    pub background: Background,
    pub card_opacity: f32,
    /// A manual accent color. Without an explicit `theme_color_auto` this
    /// switches automatic extraction off.
    #[serde(default)]
    pub theme_color: Option<HexColor>,
    #[serde(default)]
    pub layout: Option<LayoutPreferences>,
    #[serde(default)]
    pub theme_color_auto: Option<bool>,
}

/// Result of a navigation click
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionUpdate {
    /// False when the ids did not resolve and nothing changed
    pub accepted: bool,
    /// Issued when the highlight has to move
    pub highlight: Option<HighlightTicket>,
}

pub struct Dashboard {
    loading: bool,
    navigation: NavigationStore,
    background: Background,
    prefs: UserPreferences,
    uses_default_access_code: bool,
    highlight: HighlightTracker,
    pending_ticket: Option<HighlightTicket>,
    storage: Arc<dyn DashboardStorage>,
    resolver: AppearanceResolver,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("loading", &self.loading)
            .field("navigation", &self.navigation)
            .field("background", &self.background)
            .field("prefs", &self.prefs)
            .field("highlight", &self.highlight)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(
        storage: Arc<dyn DashboardStorage>,
        resolver: AppearanceResolver,
        selection_policy: SelectionPolicy,
        display_policy: DisplayPolicy,
        settle_delay_ms: u64,
    ) -> Self {
        Self {
            loading: true,
            navigation: NavigationStore::new(selection_policy, display_policy),
            background: Background::default(),
            prefs: UserPreferences::default(),
            uses_default_access_code: false,
            highlight: HighlightTracker::new(settle_delay_ms),
            pending_ticket: None,
            storage,
            resolver,
        }
    }

    pub fn from_config(
        config: &DashboardConfig,
        storage: Arc<dyn DashboardStorage>,
        resolver: AppearanceResolver,
    ) -> Self {
        Self::new(
            storage,
            resolver,
            config.navigation.selection_policy,
            config.navigation.display_policy,
            config.highlight.settle_delay_ms,
        )
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn navigation(&self) -> &NavigationStore {
        &self.navigation
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.prefs
    }

    pub fn resolver(&self) -> &AppearanceResolver {
        &self.resolver
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.loading {
            Err(DashboardError::NotLoaded)
        } else {
            Ok(())
        }
    }

    /// Bulk fetch from storage followed by [`Dashboard::install`].
    ///
    /// The initial accent color is extracted inline when auto mode is on and
    /// the stored background is an image; a failed extraction keeps the
    /// stored color.
    pub async fn load(&mut self) -> HighlightTicket {
        self.loading = true;

        let snapshot = Self::fetch(self.storage.as_ref()).await;
        let (ticket, pending) = self.install(snapshot);

        if let Some(pending) = pending {
            let outcome = pending.run().await;
            if let Some(color) = outcome.color
                && self.resolver.is_latest(outcome.sequence)
            {
                self.prefs.theme.theme_color = color;
            }
        }

        ticket
    }

    /// Fetch half of a load. Needs only the storage handle, so a caller
    /// sharing the dashboard behind a lock can run it unlocked.
    ///
    /// A failed fetch is logged and yields the defaults.
    pub async fn fetch(storage: &dyn DashboardStorage) -> DashboardSnapshot {
        match storage.fetch_all().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to load dashboard data: {e}");
                DashboardSnapshot::default()
            }
        }
    }

    /// Adopt a fetched snapshot and leave the loading state.
    ///
    /// Returns the first highlight ticket and, when auto mode is on and the
    /// background is an image, the initial color extraction to run.
    pub fn install(
        &mut self,
        snapshot: DashboardSnapshot,
    ) -> (HighlightTicket, Option<PendingExtraction>) {
        if let Err(e) = validate_tree(&snapshot.categories) {
            warn!("stored category tree is inconsistent: {e}");
        }

        self.background = snapshot.background;
        self.prefs = snapshot.prefs;
        self.prefs.theme = self.prefs.theme.clone().normalized();
        self.uses_default_access_code = snapshot.uses_default_access_code;

        self.navigation.replace_categories(snapshot.categories);
        self.navigation.select_first();
        self.loading = false;

        info!(
            categories = self.navigation.categories().len(),
            background = ?self.background.kind(),
            "dashboard loaded"
        );

        let ticket = self.issue_ticket(HighlightTrigger::ActiveCategoryChanged);
        (ticket, self.pending_extraction())
    }

    fn issue_ticket(&mut self, trigger: HighlightTrigger) -> HighlightTicket {
        let category = self.navigation.selection().active_category.clone();
        if category.is_none() {
            self.highlight.clear();
        }
        let ticket = self.highlight.invalidate(trigger, category);
        self.pending_ticket = Some(ticket.clone());
        ticket
    }

    fn selection_update(
        &mut self,
        accepted: bool,
        previous: Option<CategoryId>,
    ) -> SelectionUpdate {
        let moved = self.navigation.selection().active_category != previous;
        SelectionUpdate {
            accepted,
            highlight: moved
                .then(|| self.issue_ticket(HighlightTrigger::ActiveCategoryChanged)),
        }
    }

    pub fn select_category(&mut self, id: &CategoryId) -> Result<SelectionUpdate> {
        self.ensure_loaded()?;
        let previous = self.navigation.selection().active_category.clone();
        let accepted = self.navigation.select_category(id);
        Ok(self.selection_update(accepted, previous))
    }

    pub fn select_sub_category(
        &mut self,
        category_id: &CategoryId,
        sub_category_id: &SubCategoryId,
    ) -> Result<SelectionUpdate> {
        self.ensure_loaded()?;
        let previous = self.navigation.selection().active_category.clone();
        let accepted = self
            .navigation
            .select_sub_category(category_id, sub_category_id);
        Ok(self.selection_update(accepted, previous))
    }

    /// Swap in an edited tree from the link manager.
    ///
    /// The tree is validated, installed wholesale, the selection repaired and
    /// the result persisted.
    pub async fn replace_categories(
        &mut self,
        categories: Vec<Category>,
    ) -> Result<HighlightTicket> {
        self.ensure_loaded()?;
        validate_tree(&categories)?;

        let change = self.navigation.replace_categories(categories);
        debug!(?change, "category tree replaced");
        let ticket = self.issue_ticket(HighlightTrigger::CategoriesChanged);

        if let Err(e) = self
            .storage
            .save_categories(self.navigation.categories().to_vec())
            .await
        {
            warn!("Failed to save categories: {e}");
        }

        Ok(ticket)
    }

    /// Apply the settings panel.
    ///
    /// Returns the extraction to run when the new state calls for one.
    pub async fn update_appearance(
        &mut self,
        update: AppearanceUpdate,
    ) -> Result<Option<PendingExtraction>> {
        self.ensure_loaded()?;

        let was_auto = self.prefs.theme.theme_color_auto;
        let background_changed = self.background != update.background;

        let auto = update
            .theme_color_auto
            .unwrap_or(if update.theme_color.is_some() { false } else { was_auto });

        self.background = update.background;
        self.prefs.theme.set_card_opacity(update.card_opacity);
        if let Some(color) = update.theme_color {
            self.prefs.theme.theme_color = color;
        }
        self.prefs.theme.theme_color_auto = auto;
        if let Some(layout) = update.layout {
            self.prefs.layout = layout;
        }
        if !auto {
            self.resolver.cancel_pending();
        }

        if let Err(e) = self.storage.set_background(self.background.clone()).await {
            warn!("Failed to save background: {e}");
        }
        let patch = PreferencesPatch::from_theme(&self.prefs.theme)
            .with_layout(self.prefs.layout);
        if let Err(e) = self.storage.save_preferences(patch, true).await {
            warn!("Failed to save theme preferences: {e}");
        }

        if background_changed || (auto && !was_auto) {
            Ok(self.pending_extraction())
        } else {
            Ok(None)
        }
    }

    fn pending_extraction(&self) -> Option<PendingExtraction> {
        AppearanceResolver::should_extract(
            &self.background,
            self.prefs.theme.theme_color_auto,
        )
        .then(|| self.resolver.begin(&self.background))
    }

    /// Pick an accent color by hand, switching automatic extraction off
    pub async fn set_theme_color(&mut self, color: HexColor) -> Result<()> {
        self.ensure_loaded()?;

        self.prefs.theme.theme_color = color;
        self.prefs.theme.theme_color_auto = false;
        self.resolver.cancel_pending();

        let patch = PreferencesPatch {
            theme_color: Some(color),
            theme_color_auto: Some(false),
            ..Default::default()
        };
        if let Err(e) = self.storage.save_preferences(patch, true).await {
            warn!("Failed to save theme color: {e}");
        }
        Ok(())
    }

    /// Return to following the background
    pub async fn enable_auto_color(&mut self) -> Result<Option<PendingExtraction>> {
        self.ensure_loaded()?;

        self.prefs.theme.theme_color_auto = true;
        let patch = PreferencesPatch {
            theme_color_auto: Some(true),
            ..Default::default()
        };
        if let Err(e) = self.storage.save_preferences(patch, true).await {
            warn!("Failed to save theme preferences: {e}");
        }

        Ok(self.pending_extraction())
    }

    pub async fn toggle_theme_mode(&mut self) -> Result<ThemeMode> {
        self.ensure_loaded()?;

        let mode = self.prefs.theme.theme_mode.toggled();
        self.prefs.theme.theme_mode = mode;

        let patch = PreferencesPatch::from_theme(&self.prefs.theme);
        if let Err(e) = self.storage.save_preferences(patch, false).await {
            warn!("Failed to save theme mode: {e}");
        }
        Ok(mode)
    }

    /// Adopt the color of a finished extraction.
    ///
    /// Dropped when a newer extraction was started since, when auto mode was
    /// switched off meanwhile, or when extraction failed. Returns whether the
    /// color changed hands.
    pub async fn apply_extraction(&mut self, outcome: ExtractionOutcome) -> bool {
        if !self.resolver.is_latest(outcome.sequence) {
            debug!(sequence = outcome.sequence, "dropping stale color extraction");
            return false;
        }
        if !self.prefs.theme.theme_color_auto || outcome.background != self.background {
            debug!(sequence = outcome.sequence, "extraction no longer applies");
            return false;
        }
        let Some(color) = outcome.color else {
            return false;
        };

        self.prefs.theme.theme_color = color;
        let patch = PreferencesPatch {
            theme_color: Some(color),
            ..Default::default()
        };
        if let Err(e) = self.storage.save_preferences(patch, false).await {
            warn!("Failed to save extracted color: {e}");
        }
        true
    }

    /// The window was resized; the pill has to be re-measured
    pub fn resize_viewport(&mut self) -> HighlightTicket {
        self.issue_ticket(HighlightTrigger::ViewportResized)
    }

    /// Feed back a measurement taken for `generation`
    pub fn settle_highlight(
        &mut self,
        generation: u64,
        tab: Bounds,
        track: Bounds,
    ) -> Option<HighlightGeometry> {
        let geometry = self.highlight.settle(generation, tab, track)?;
        self.pending_ticket = None;
        Some(geometry)
    }

    pub fn view(&self) -> Result<DashboardView> {
        self.ensure_loaded()?;

        let items = self.navigation.display_items();
        Ok(DashboardView {
            categories: self.navigation.categories().to_vec(),
            selection: self.navigation.selection().clone(),
            items: items.iter().map(DisplayCard::from).collect(),
            heading: self.navigation.display_heading().map(str::to_string),
            shows_sub_navigation: self.navigation.shows_sub_navigation(),
            background: BackgroundView::from(&self.background),
            prefs: self.prefs.clone(),
            theme: ThemeVariables::new(
                self.prefs.theme.theme_color,
                self.prefs.theme.theme_mode,
            ),
            highlight: self.highlight.geometry(),
            highlight_ticket: self.pending_ticket.clone(),
            uses_default_access_code: self.uses_default_access_code,
        })
    }
}
