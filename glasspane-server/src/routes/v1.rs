use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    AppState,
    handlers::{appearance, dashboard, highlight, search},
};

/// Create all v1 API routes
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::get_dashboard))
        .route("/navigation/category", post(dashboard::select_category))
        .route(
            "/navigation/sub-category",
            post(dashboard::select_sub_category),
        )
        .route("/categories", put(dashboard::replace_categories))
        .merge(create_appearance_routes())
        .merge(create_highlight_routes())
        .merge(create_search_routes())
}

fn create_appearance_routes() -> Router<AppState> {
    Router::new()
        .route("/appearance", put(appearance::update_appearance))
        .route("/appearance/color", put(appearance::set_color))
        .route("/theme/toggle", post(appearance::toggle_theme))
}

fn create_highlight_routes() -> Router<AppState> {
    Router::new()
        .route("/highlight/invalidate", post(highlight::invalidate))
        .route("/highlight/settle", post(highlight::settle))
}

fn create_search_routes() -> Router<AppState> {
    Router::new()
        .route("/search/engines", get(search::list_engines))
        .route("/search", get(search::dispatch))
}
