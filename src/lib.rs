use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: config::AppConfig,
}

// ── Router ─────────────────────────────────────────────────────────────────

/// Build the full application router. Static paths are registered alongside
/// `/ads/:id`; the router prefers the static match, so `/ads/stats` never
/// resolves as an ad lookup.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ads", get(handlers::ads::list_ads))
        .route("/ads/stats", get(handlers::ads::get_stats))
        .route("/ads/stats/by-date", get(handlers::ads::ads_by_date))
        .route("/ads/stats/platforms", get(handlers::ads::platform_stats))
        .route("/ads/:id", get(handlers::ads::get_ad))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.parse::<HeaderValue>() {
        Ok(value) if origin != "*" => layer.allow_origin(value),
        _ => layer.allow_origin(Any),
    }
}
