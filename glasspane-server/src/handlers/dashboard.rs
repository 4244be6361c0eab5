use axum::{Json, extract::State};
use glasspane_core::dashboard::{DashboardView, SelectionUpdate};
use glasspane_core::navigation::HighlightTicket;
use glasspane_model::prelude::{Category, CategoryId, SubCategoryId};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::infra::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectCategoryRequest {
    pub category_id: CategoryId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectSubCategoryRequest {
    pub category_id: CategoryId,
    pub sub_category_id: SubCategoryId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    /// False when the ids did not resolve and nothing changed
    pub accepted: bool,
    pub highlight_ticket: Option<HighlightTicket>,
    pub view: DashboardView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub highlight_ticket: HighlightTicket,
    pub view: DashboardView,
}

/// Everything the renderer needs; 503 until the initial load completed
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> AppResult<Json<DashboardView>> {
    let dashboard = state.dashboard.lock().await;
    Ok(Json(dashboard.view()?))
}

pub async fn select_category(
    State(state): State<AppState>,
    Json(request): Json<SelectCategoryRequest>,
) -> AppResult<Json<SelectionResponse>> {
    let mut dashboard = state.dashboard.lock().await;
    let SelectionUpdate {
        accepted,
        highlight,
    } = dashboard.select_category(&request.category_id)?;

    Ok(Json(SelectionResponse {
        accepted,
        highlight_ticket: highlight,
        view: dashboard.view()?,
    }))
}

pub async fn select_sub_category(
    State(state): State<AppState>,
    Json(request): Json<SelectSubCategoryRequest>,
) -> AppResult<Json<SelectionResponse>> {
    let mut dashboard = state.dashboard.lock().await;
    let SelectionUpdate {
        accepted,
        highlight,
    } = dashboard
        .select_sub_category(&request.category_id, &request.sub_category_id)?;

    Ok(Json(SelectionResponse {
        accepted,
        highlight_ticket: highlight,
        view: dashboard.view()?,
    }))
}

/// Link manager callback: install an edited category tree
pub async fn replace_categories(
    State(state): State<AppState>,
    Json(categories): Json<Vec<Category>>,
) -> AppResult<Json<CategoriesResponse>> {
    let mut dashboard = state.dashboard.lock().await;
    let highlight_ticket = dashboard.replace_categories(categories).await?;

    Ok(Json(CategoriesResponse {
        highlight_ticket,
        view: dashboard.view()?,
    }))
}
