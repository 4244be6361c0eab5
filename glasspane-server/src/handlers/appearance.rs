use axum::{Json, extract::State};
use glasspane_core::dashboard::{AppearanceUpdate, DashboardView};
use glasspane_model::prelude::{HexColor, ThemeMode};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceResponse {
    /// A color extraction is running and will update the theme when done
    pub extraction_scheduled: bool,
    pub view: DashboardView,
}

/// Either a manual color or a request to follow the background again
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRequest {
    #[serde(default)]
    pub theme_color: Option<HexColor>,
    #[serde(default)]
    pub auto: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeModeResponse {
    pub theme_mode: ThemeMode,
}

pub async fn update_appearance(
    State(state): State<AppState>,
    Json(update): Json<AppearanceUpdate>,
) -> AppResult<Json<AppearanceResponse>> {
    let mut dashboard = state.dashboard.lock().await;
    let pending = dashboard.update_appearance(update).await?;
    let view = dashboard.view()?;
    drop(dashboard);

    let extraction_scheduled = pending.is_some();
    if let Some(pending) = pending {
        state.spawn_extraction(pending);
    }

    Ok(Json(AppearanceResponse {
        extraction_scheduled,
        view,
    }))
}

pub async fn set_color(
    State(state): State<AppState>,
    Json(request): Json<ColorRequest>,
) -> AppResult<Json<AppearanceResponse>> {
    let mut dashboard = state.dashboard.lock().await;

    let pending = match (request.auto, request.theme_color) {
        (true, _) => dashboard.enable_auto_color().await?,
        (false, Some(color)) => {
            dashboard.set_theme_color(color).await?;
            None
        }
        (false, None) => {
            return Err(AppError::bad_request(
                "either themeColor or auto must be provided",
            ));
        }
    };
    let view = dashboard.view()?;
    drop(dashboard);

    let extraction_scheduled = pending.is_some();
    if let Some(pending) = pending {
        state.spawn_extraction(pending);
    }

    Ok(Json(AppearanceResponse {
        extraction_scheduled,
        view,
    }))
}

pub async fn toggle_theme(
    State(state): State<AppState>,
) -> AppResult<Json<ThemeModeResponse>> {
    let theme_mode = state.dashboard.lock().await.toggle_theme_mode().await?;
    Ok(Json(ThemeModeResponse { theme_mode }))
}
