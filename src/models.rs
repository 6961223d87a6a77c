use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ── Enums ──────────────────────────────────────────────────────────────────

/// Lifecycle status of an ad. Stored as TEXT in the `ads` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum AdStatus {
    Active,
    Inactive,
}

impl AdStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AdStatus::Active => "ACTIVE",
            AdStatus::Inactive => "INACTIVE",
        }
    }
}

/// Creative asset kind carried by an ad version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AssetType {
    Image,
    Video,
}

// ── Entities ───────────────────────────────────────────────────────────────

/// An ad record from the `ads` table. `ad_id` is the external library
/// identifier issued by the ad network; `id` is ours.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Ad {
    pub id: String,
    pub ad_id: String,
    pub status: AdStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub page_name: String,
    pub page_profile_uri: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A revision of an ad's creative content from the `ad_versions` table,
/// ordered per ad by `version_number`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdVersion {
    pub id: String,
    pub ad_id: String,
    pub version_number: i64,
    pub ad_copy: Option<String>,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub asset_type: Option<AssetType>,
    pub link_url: Option<String>,
    pub link_description: Option<String>,
    pub cta_text: Option<String>,
    pub cta_type: Option<String>,
    pub caption: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A distribution-platform association from the `ad_platforms` table.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdPlatform {
    pub id: String,
    pub ad_id: String,
    pub platform: String,
    pub created_at: NaiveDateTime,
}

/// An ad with its versions (ascending by version number) and platforms
/// (ascending by name) attached. Assembled on read, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AdWithRelations {
    #[serde(flatten)]
    pub ad: Ad,
    pub versions: Vec<AdVersion>,
    pub platforms: Vec<AdPlatform>,
}

// ── Response shapes ────────────────────────────────────────────────────────

/// One page of a filtered result set plus the envelope the dashboard uses to
/// page through it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

/// Per-day ad counts, split by status. Days with no matching ads are not
/// returned.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub count: i64,
    pub active: i64,
    pub inactive: i64,
}

/// Distinct-ad count for one distribution platform.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlatformBucket {
    pub platform: String,
    pub count: i64,
}

/// The combined statistics bundle for the dashboard overview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub by_date: Vec<DateBucket>,
    pub by_platform: Vec<PlatformBucket>,
}
