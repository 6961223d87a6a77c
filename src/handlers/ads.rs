use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    db,
    error::ApiError,
    models::{AdStats, AdWithRelations, DateBucket, Paginated, PlatformBucket},
    query::{FilterCriteria, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE},
    AppState,
};

// ── Query-string params ────────────────────────────────────────────────────

/// Raw query-string input for the list endpoint. Every field arrives untyped
/// and optional; coercion is lenient — missing, empty, or malformed values
/// fall back instead of failing the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    status: Option<String>,
    platform: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    page_name: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl ListParams {
    fn filters(&self) -> FilterCriteria {
        FilterCriteria {
            status: non_empty(&self.status),
            platform: non_empty(&self.platform),
            start_date: parse_date(&self.start_date),
            end_date: parse_date(&self.end_date),
            page_name: non_empty(&self.page_name),
        }
    }

    fn pagination(&self) -> Pagination {
        Pagination {
            page: parse_or(&self.page, DEFAULT_PAGE),
            limit: parse_or(&self.limit, DEFAULT_LIMIT),
        }
    }
}

/// Filters accepted by the combined stats endpoint (no page-name, no
/// pagination).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsParams {
    status: Option<String>,
    platform: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl StatsParams {
    fn filters(&self) -> FilterCriteria {
        FilterCriteria {
            status: non_empty(&self.status),
            platform: non_empty(&self.platform),
            start_date: parse_date(&self.start_date),
            end_date: parse_date(&self.end_date),
            page_name: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ByDateParams {
    platform: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlatformStatsParams {
    status: Option<String>,
}

// ── Handlers ───────────────────────────────────────────────────────────────

/// GET /ads
pub async fn list_ads(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Paginated<AdWithRelations>>, ApiError> {
    let page = db::list_ads(&state.db, &params.filters(), params.pagination()).await?;
    Ok(Json(page))
}

/// GET /ads/:id
pub async fn get_ad(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AdWithRelations>, ApiError> {
    let ad = db::get_ad(&state.db, &id)
        .await?
        .ok_or(ApiError::NotFound("Ad not found"))?;
    Ok(Json(ad))
}

/// GET /ads/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Result<Json<AdStats>, ApiError> {
    let stats = db::fetch_stats(&state.db, &params.filters()).await?;
    Ok(Json(stats))
}

/// GET /ads/stats/by-date
pub async fn ads_by_date(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ByDateParams>,
) -> Result<Json<Vec<DateBucket>>, ApiError> {
    let filters = FilterCriteria {
        platform: non_empty(&params.platform),
        ..Default::default()
    };
    let buckets = db::ads_by_date(&state.db, &filters).await?;
    Ok(Json(buckets))
}

/// GET /ads/stats/platforms
pub async fn platform_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlatformStatsParams>,
) -> Result<Json<Vec<PlatformBucket>>, ApiError> {
    let filters = FilterCriteria {
        status: non_empty(&params.status),
        ..Default::default()
    };
    let buckets = db::platform_stats(&state.db, &filters).await?;
    Ok(Json(buckets))
}

// ── Coercion helpers ───────────────────────────────────────────────────────

/// Missing and empty values are both treated as "filter not set".
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Dates come in as YYYY-MM-DD; anything unparseable is treated as absent.
fn parse_date(value: &Option<String>) -> Option<NaiveDate> {
    value.as_deref().and_then(|s| s.parse().ok())
}

/// Numeric coercion for page/limit: non-numeric input and zero both fall
/// back to the default. No upper bound is enforced.
fn parse_or(value: &Option<String>, default: u32) -> u32 {
    value
        .as_deref()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|v| *v != 0)
        .unwrap_or(default)
}
