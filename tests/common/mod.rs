#![allow(dead_code)]

//! Shared test environment: an in-memory SQLite pool with the schema
//! applied, the application router, and row fixtures.

use std::sync::Arc;

use adlens::{app, config::AppConfig, AppState};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;
use uuid::Uuid;

/// Open a fresh in-memory database with the schema applied. A single pooled
/// connection keeps every query on the same in-memory instance.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("apply migrations");

    pool
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        host: "127.0.0.1".into(),
        port: 0,
        cors_origin: "*".into(),
        environment: "test".into(),
    }
}

pub async fn test_app() -> (Router, SqlitePool) {
    let pool = test_pool().await;
    let state = Arc::new(AppState {
        db: pool.clone(),
        config: test_config(),
    });
    (app(state), pool)
}

/// Issue a GET against the router and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, value)
}

// ── Fixtures ───────────────────────────────────────────────────────────────

/// Insert an ad row and return its primary key. `created_at` is explicit so
/// tests control the list ordering.
pub async fn insert_ad(
    pool: &SqlitePool,
    ad_id: &str,
    status: &str,
    start_date: &str,
    end_date: Option<&str>,
    page_name: &str,
    created_at: &str,
) -> String {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        "INSERT INTO ads (id, ad_id, status, start_date, end_date, page_name, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(&id)
    .bind(ad_id)
    .bind(status)
    .bind(start_date)
    .bind(end_date)
    .bind(page_name)
    .bind(created_at)
    .execute(pool)
    .await
    .expect("insert ad");
    id
}

pub async fn insert_platform(pool: &SqlitePool, ad_db_id: &str, platform: &str) {
    sqlx::query("INSERT INTO ad_platforms (id, ad_id, platform) VALUES (?1, ?2, ?3)")
        .bind(Uuid::new_v4().to_string())
        .bind(ad_db_id)
        .bind(platform)
        .execute(pool)
        .await
        .expect("insert platform");
}

pub async fn insert_version(
    pool: &SqlitePool,
    ad_db_id: &str,
    version_number: i64,
    title: Option<&str>,
) {
    sqlx::query("INSERT INTO ad_versions (id, ad_id, version_number, title) VALUES (?1, ?2, ?3, ?4)")
        .bind(Uuid::new_v4().to_string())
        .bind(ad_db_id)
        .bind(version_number)
        .bind(title)
        .execute(pool)
        .await
        .expect("insert version");
}
