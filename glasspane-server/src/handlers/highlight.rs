use axum::{Json, extract::State};
use glasspane_core::navigation::HighlightTicket;
use glasspane_model::prelude::{Bounds, HighlightGeometry};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::infra::app_state::AppState;

/// Bounds measured for a previously issued ticket
#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    pub generation: u64,
    pub tab: Bounds,
    pub track: Bounds,
}

#[derive(Debug, Serialize)]
pub struct SettleResponse {
    /// False when a newer ticket superseded the measurement
    pub applied: bool,
    pub highlight: HighlightGeometry,
}

/// The viewport changed size; returns the ticket to measure against
pub async fn invalidate(
    State(state): State<AppState>,
) -> AppResult<Json<HighlightTicket>> {
    let ticket = state.dashboard.lock().await.resize_viewport();
    Ok(Json(ticket))
}

pub async fn settle(
    State(state): State<AppState>,
    Json(request): Json<SettleRequest>,
) -> AppResult<Json<SettleResponse>> {
    let mut dashboard = state.dashboard.lock().await;
    let applied = dashboard
        .settle_highlight(request.generation, request.tab, request.track)
        .is_some();

    Ok(Json(SettleResponse {
        applied,
        highlight: dashboard.view()?.highlight,
    }))
}
