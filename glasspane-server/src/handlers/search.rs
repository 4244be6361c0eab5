use axum::{
    Json,
    extract::{Query, State},
};
use glasspane_core::search::SearchEngine;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub engine: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub engine: String,
    /// `None` for blank queries
    pub url: Option<String>,
}

pub async fn list_engines(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<SearchEngine>>> {
    Ok(Json(state.engines.all().to_vec()))
}

pub async fn dispatch(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let engine = state
        .engines
        .resolve(params.engine.as_deref())
        .ok_or_else(|| {
            AppError::not_found(format!(
                "unknown search engine: {}",
                params.engine.as_deref().unwrap_or_default()
            ))
        })?;

    Ok(Json(SearchResponse {
        engine: engine.id.clone(),
        url: engine.dispatch_url(&params.q),
    }))
}
