//! Route tests driving the full router with `oneshot`

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, Response, StatusCode},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use async_trait::async_trait;
use glasspane_core::config::DashboardConfig;
use glasspane_core::storage::{DashboardStorage, MemoryStorage};
use glasspane_model::prelude::{
    Background, Category, DashboardSnapshot, LinkItem, PreferencesPatch, SubCategory,
};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use serde_json::{Value, json};
use tokio::sync::Notify;
use tower::ServiceExt;

use crate::infra::startup::{bootstrap_with_storage, spawn_initial_load};
use crate::{AppState, build_router};

fn snapshot() -> DashboardSnapshot {
    DashboardSnapshot {
        categories: vec![
            Category::new("c1", "Tech").with_sub_categories(vec![
                SubCategory::default_group("s1").with_items(vec![LinkItem::new(
                    "l1",
                    "Rust",
                    "https://rust-lang.org",
                )]),
            ]),
            Category::new("c2", "Reading").with_sub_categories(vec![
                SubCategory::new("news", "News").with_items(vec![LinkItem::new(
                    "hn",
                    "Hacker News",
                    "https://news.ycombinator.com",
                )]),
                SubCategory::new("docs", "Docs").with_items(vec![LinkItem::new(
                    "std",
                    "Rust std",
                    "https://doc.rust-lang.org/std/",
                )]),
            ]),
        ],
        ..Default::default()
    }
}

fn test_config() -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.appearance.max_retries = 0;
    config.appearance.timeout_ms = 2_000;
    config
}

async fn test_app() -> (Router, AppState) {
    let storage = Arc::new(MemoryStorage::new(snapshot()));
    let state = bootstrap_with_storage(test_config(), storage).unwrap();
    spawn_initial_load(&state).await.unwrap();
    (build_router(state.clone()), state)
}

/// Memory storage whose bulk fetch waits until the gate is opened
struct GatedStorage {
    inner: MemoryStorage,
    gate: Arc<Notify>,
}

#[async_trait]
impl DashboardStorage for GatedStorage {
    async fn fetch_all(&self) -> glasspane_core::Result<DashboardSnapshot> {
        self.gate.notified().await;
        self.inner.fetch_all().await
    }

    async fn set_background(&self, background: Background) -> glasspane_core::Result<()> {
        self.inner.set_background(background).await
    }

    async fn save_preferences(
        &self,
        patch: PreferencesPatch,
        immediate: bool,
    ) -> glasspane_core::Result<()> {
        self.inner.save_preferences(patch, immediate).await
    }

    async fn save_categories(&self, categories: Vec<Category>) -> glasspane_core::Result<()> {
        self.inner.save_categories(categories).await
    }
}

fn solid_data_uri(rgb: [u8; 3]) -> String {
    let [r, g, b] = rgb;
    let image = RgbaImage::from_pixel(8, 8, Rgba([r, g, b, 255]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image)
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", BASE64.encode(buffer.into_inner()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn ping_responds() {
    let (app, _) = test_app().await;
    let response = app.oneshot(get("/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn dashboard_is_unavailable_while_loading() {
    let gate = Arc::new(Notify::new());
    let storage = Arc::new(GatedStorage {
        inner: MemoryStorage::new(snapshot()),
        gate: Arc::clone(&gate),
    });
    let state = bootstrap_with_storage(test_config(), storage).unwrap();
    let load = spawn_initial_load(&state);
    let app = build_router(state);

    let response = app.clone().oneshot(get("/api/v1/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["error"]["status"], 503);

    let response = app.clone().oneshot(get("/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    gate.notify_one();
    load.await.unwrap();

    let response = app.oneshot(get("/api/v1/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["selection"]["activeCategory"], "c1");
}

#[tokio::test]
async fn dashboard_view_after_load() {
    let (app, _) = test_app().await;
    let response = app.oneshot(get("/api/v1/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let view = json_body(response).await;
    assert_eq!(view["selection"]["activeCategory"], "c1");
    assert_eq!(view["selection"]["activeSubCategory"], "s1");
    assert_eq!(view["items"][0]["groupLabel"], "Tech");
    assert_eq!(view["heading"], "Tech");
    assert_eq!(view["showsSubNavigation"], false);
    assert_eq!(view["background"]["kind"], "style");
    assert_eq!(view["theme"]["primary"], "#6280a3");
    assert_eq!(view["theme"]["primaryRgb"], "98, 128, 163");
    assert_eq!(view["prefs"]["gridColumns"], 6);
    assert_eq!(view["highlight"]["visible"], false);
    assert_eq!(view["highlightTicket"]["category"], "c1");
}

#[tokio::test]
async fn category_click_moves_selection() {
    let (app, _) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/navigation/category",
            json!({ "categoryId": "c2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["accepted"], true);
    assert_eq!(body["highlightTicket"]["trigger"], "active_category_changed");
    assert_eq!(body["view"]["selection"]["activeSubCategory"], "news");
    assert_eq!(body["view"]["showsSubNavigation"], true);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/navigation/category",
            json!({ "categoryId": "nope" }),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["accepted"], false);
    assert_eq!(body["view"]["selection"]["activeCategory"], "c2");
}

#[tokio::test]
async fn sub_category_click_filters_cards() {
    let (app, _) = test_app().await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/navigation/sub-category",
            json!({ "categoryId": "c2", "subCategoryId": "docs" }),
        ))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["accepted"], true);
    assert_eq!(body["view"]["heading"], "Docs");
    assert_eq!(body["view"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["view"]["items"][0]["id"], "std");
}

#[tokio::test]
async fn replacing_categories_validates_tree() {
    let (app, state) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/categories",
            json!([
                { "id": "dup", "title": "A" },
                { "id": "dup", "title": "B" }
            ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/categories",
            json!([{ "id": "only", "title": "Only", "subCategories": [] }]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["view"]["selection"]["activeCategory"], "only");
    assert_eq!(body["highlightTicket"]["trigger"], "categories_changed");

    let stored = state.storage.fetch_all().await.unwrap();
    assert_eq!(stored.categories.len(), 1);
}

#[tokio::test]
async fn image_background_updates_color_in_background() {
    let (app, state) = test_app().await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/appearance",
            json!({
                "background": solid_data_uri([40, 80, 120]),
                "cardOpacity": 0.25
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["extractionScheduled"], true);
    assert_eq!(body["view"]["background"]["kind"], "data_uri");

    let mut color = String::new();
    for _ in 0..100 {
        color = state
            .dashboard
            .lock()
            .await
            .preferences()
            .theme
            .theme_color
            .to_string();
        if color == "#285078" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(color, "#285078");
}

#[tokio::test]
async fn manual_color_disables_auto_mode() {
    let (app, _) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/appearance/color",
            json!({ "themeColor": "#f80" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["extractionScheduled"], false);
    assert_eq!(body["view"]["prefs"]["themeColor"], "#ff8800");
    assert_eq!(body["view"]["prefs"]["themeColorAuto"], false);

    let response = app
        .oneshot(json_request(
            Method::PUT,
            "/api/v1/appearance/color",
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn theme_toggle_flips_mode() {
    let (app, _) = test_app().await;
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/theme/toggle")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(json_body(response).await["themeMode"], "light");
}

#[tokio::test]
async fn highlight_only_accepts_latest_ticket() {
    let (app, _) = test_app().await;

    let invalidate = || {
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/highlight/invalidate")
            .body(Body::empty())
            .unwrap()
    };
    let first = json_body(app.clone().oneshot(invalidate()).await.unwrap()).await;
    let second = json_body(app.clone().oneshot(invalidate()).await.unwrap()).await;
    assert_eq!(second["trigger"], "viewport_resized");
    assert_eq!(second["settleAfterMs"], 50);

    let settle = |generation: &Value| {
        json_request(
            Method::POST,
            "/api/v1/highlight/settle",
            json!({
                "generation": generation,
                "tab": { "left": 120.0, "top": 0.0, "width": 64.0, "height": 32.0 },
                "track": { "left": 100.0, "top": 0.0, "width": 400.0, "height": 40.0 }
            }),
        )
    };

    let stale = json_body(
        app.clone()
            .oneshot(settle(&first["generation"]))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(stale["applied"], false);
    assert_eq!(stale["highlight"]["visible"], false);

    let fresh = json_body(app.oneshot(settle(&second["generation"])).await.unwrap()).await;
    assert_eq!(fresh["applied"], true);
    assert_eq!(fresh["highlight"]["offset"], 20.0);
    assert_eq!(fresh["highlight"]["width"], 64.0);
}

#[tokio::test]
async fn search_dispatch() {
    let (app, _) = test_app().await;

    let engines = json_body(
        app.clone()
            .oneshot(get("/api/v1/search/engines"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(engines.as_array().map(Vec::len), Some(4));
    assert_eq!(engines[0]["urlTemplate"], "https://www.google.com/search?q=");

    let body = json_body(
        app.clone()
            .oneshot(get("/api/v1/search?q=hello%20world&engine=duckduckgo"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["url"], "https://duckduckgo.com/?q=hello%20world");

    let body = json_body(
        app.clone()
            .oneshot(get("/api/v1/search?q=%20%20"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["engine"], "google");
    assert!(body["url"].is_null());

    let response = app
        .oneshot(get("/api/v1/search?q=x&engine=altavista"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
