//! # Glasspane Server
//!
//! JSON boundary over [`glasspane_core::dashboard::Dashboard`]: a rendering
//! layer fetches the dashboard view, posts navigation clicks and appearance
//! changes, and reports tab measurements for the sliding highlight.

pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

#[cfg(test)]
mod tests;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use infra::app_state::AppState;

/// Full application router with middleware applied
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .merge(routes::create_api_router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Glasspane is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
