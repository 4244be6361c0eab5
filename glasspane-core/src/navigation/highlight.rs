//! Deferred measurement of the sliding tab highlight.
//!
//! The presentation layer can only measure tab bounds after it has laid out
//! the new state, so every trigger hands out a [`HighlightTicket`] and the
//! measurement comes back later through [`HighlightTracker::settle`]. Only the
//! most recent ticket is honoured.

use glasspane_model::{Bounds, CategoryId, HighlightGeometry};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Default wait between a trigger and the measurement it asks for
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 50;

/// Pill placement relative to the tab track
pub fn compute_highlight_geometry(tab: Bounds, track: Bounds) -> HighlightGeometry {
    HighlightGeometry {
        offset: tab.left - track.left,
        width: tab.width,
        visible: true,
    }
}

/// Events after which the highlight has to be re-measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightTrigger {
    ActiveCategoryChanged,
    CategoriesChanged,
    ViewportResized,
}

/// Request to measure the active tab once layout has settled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightTicket {
    pub generation: u64,
    /// Tab the measurement should target. `None` when nothing is selected.
    pub category: Option<CategoryId>,
    pub trigger: HighlightTrigger,
    pub settle_after_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct HighlightTracker {
    generation: u64,
    settle_delay_ms: u64,
    geometry: Option<HighlightGeometry>,
}

impl HighlightTracker {
    pub fn new(settle_delay_ms: u64) -> Self {
        Self {
            generation: 0,
            settle_delay_ms,
            geometry: None,
        }
    }

    /// Supersede any outstanding ticket and issue a fresh one
    pub fn invalidate(
        &mut self,
        trigger: HighlightTrigger,
        category: Option<CategoryId>,
    ) -> HighlightTicket {
        self.generation += 1;
        trace!(generation = self.generation, ?trigger, "highlight invalidated");

        HighlightTicket {
            generation: self.generation,
            category,
            trigger,
            settle_after_ms: self.settle_delay_ms,
        }
    }

    /// Apply a measurement taken for `generation`.
    ///
    /// Returns the new geometry, or `None` when the ticket has been
    /// superseded and the measurement was dropped.
    pub fn settle(
        &mut self,
        generation: u64,
        tab: Bounds,
        track: Bounds,
    ) -> Option<HighlightGeometry> {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                "dropping stale highlight measurement"
            );
            return None;
        }

        let geometry = compute_highlight_geometry(tab, track);
        self.geometry = Some(geometry);
        Some(geometry)
    }

    /// Current placement; invisible until the first measurement lands
    pub fn geometry(&self) -> HighlightGeometry {
        self.geometry.unwrap_or_default()
    }

    /// Hide the pill, e.g. when the tab strip becomes empty
    pub fn clear(&mut self) {
        self.generation += 1;
        self.geometry = None;
    }
}
