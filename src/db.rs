use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::{
    models::{Ad, AdPlatform, AdStats, AdStatus, AdVersion, AdWithRelations, DateBucket, Paginated, PlatformBucket},
    query::{FilterCriteria, Pagination},
};

const AD_COLUMNS: &str = "a.id, a.ad_id, a.status, a.start_date, a.end_date, \
                          a.page_name, a.page_profile_uri, a.created_at, a.updated_at";

// ── Ads ────────────────────────────────────────────────────────────────────

/// Count ads matching the full filter set. Distinct over ad identity so the
/// platform join cannot inflate the total, and built from the same clause
/// renderer as the page query so the two can never disagree.
pub async fn count_ads(pool: &SqlitePool, filters: &FilterCriteria) -> Result<i64, sqlx::Error> {
    let mut qb = QueryBuilder::new("SELECT COUNT(DISTINCT a.id) FROM ads a");
    filters.push_platform_join(&mut qb);
    filters.push_predicates(&mut qb);

    qb.build_query_scalar().fetch_one(pool).await
}

/// Return one page of ads matching the filters, newest first, with versions
/// and platforms attached.
pub async fn list_ads(
    pool: &SqlitePool,
    filters: &FilterCriteria,
    pagination: Pagination,
) -> Result<Paginated<AdWithRelations>, sqlx::Error> {
    let total = count_ads(pool, filters).await?;

    let mut qb = QueryBuilder::new(format!("SELECT DISTINCT {AD_COLUMNS} FROM ads a"));
    filters.push_platform_join(&mut qb);
    filters.push_predicates(&mut qb);
    qb.push(" ORDER BY a.created_at DESC LIMIT ")
        .push_bind(i64::from(pagination.limit))
        .push(" OFFSET ")
        .push_bind(pagination.offset());

    let ads: Vec<Ad> = qb.build_query_as().fetch_all(pool).await?;
    let data = attach_relations(pool, ads).await?;

    Ok(Paginated {
        data,
        total,
        page: pagination.page,
        limit: pagination.limit,
        total_pages: pagination.total_pages(total),
    })
}

/// Fetch a single ad with relations. The id is tried as our primary key
/// first, then as the external library id, so dashboard deep-links work with
/// either. Absence is a valid outcome, not an error.
pub async fn get_ad(pool: &SqlitePool, id: &str) -> Result<Option<AdWithRelations>, sqlx::Error> {
    let ad: Option<Ad> = sqlx::query_as(
        "SELECT id, ad_id, status, start_date, end_date,
                page_name, page_profile_uri, created_at, updated_at
         FROM ads WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let ad = match ad {
        Some(ad) => ad,
        None => {
            let by_library_id: Option<Ad> = sqlx::query_as(
                "SELECT id, ad_id, status, start_date, end_date,
                        page_name, page_profile_uri, created_at, updated_at
                 FROM ads WHERE ad_id = ?1",
            )
            .bind(id)
            .fetch_optional(pool)
            .await?;

            match by_library_id {
                Some(ad) => ad,
                None => return Ok(None),
            }
        }
    };

    let mut hydrated = attach_relations(pool, vec![ad]).await?;
    Ok(hydrated.pop())
}

// ── Relation hydration ─────────────────────────────────────────────────────

/// Attach versions and platforms to a page of ads with one batched query per
/// relation, grouped client-side by ad identity. Row order inside each group
/// comes from the query (version number ascending, platform name ascending).
async fn attach_relations(
    pool: &SqlitePool,
    ads: Vec<Ad>,
) -> Result<Vec<AdWithRelations>, sqlx::Error> {
    if ads.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = ads.iter().map(|a| a.id.clone()).collect();
    let (versions, platforms) =
        tokio::try_join!(versions_for(pool, &ids), platforms_for(pool, &ids))?;

    let mut versions_by_ad: HashMap<String, Vec<AdVersion>> = HashMap::new();
    for version in versions {
        versions_by_ad
            .entry(version.ad_id.clone())
            .or_default()
            .push(version);
    }

    let mut platforms_by_ad: HashMap<String, Vec<AdPlatform>> = HashMap::new();
    for platform in platforms {
        platforms_by_ad
            .entry(platform.ad_id.clone())
            .or_default()
            .push(platform);
    }

    Ok(ads
        .into_iter()
        .map(|ad| {
            let versions = versions_by_ad.remove(&ad.id).unwrap_or_default();
            let platforms = platforms_by_ad.remove(&ad.id).unwrap_or_default();
            AdWithRelations {
                ad,
                versions,
                platforms,
            }
        })
        .collect())
}

async fn versions_for(pool: &SqlitePool, ad_ids: &[String]) -> Result<Vec<AdVersion>, sqlx::Error> {
    let mut qb = QueryBuilder::new(
        "SELECT id, ad_id, version_number, ad_copy, title, image_url, video_url, \
         asset_type, link_url, link_description, cta_text, cta_type, caption, created_at \
         FROM ad_versions WHERE ad_id IN (",
    );
    push_id_list(&mut qb, ad_ids);
    qb.push(") ORDER BY ad_id, version_number ASC");

    qb.build_query_as().fetch_all(pool).await
}

async fn platforms_for(pool: &SqlitePool, ad_ids: &[String]) -> Result<Vec<AdPlatform>, sqlx::Error> {
    let mut qb = QueryBuilder::new(
        "SELECT id, ad_id, platform, created_at FROM ad_platforms WHERE ad_id IN (",
    );
    push_id_list(&mut qb, ad_ids);
    qb.push(") ORDER BY ad_id, platform ASC");

    qb.build_query_as().fetch_all(pool).await
}

fn push_id_list(qb: &mut QueryBuilder<'_, Sqlite>, ids: &[String]) {
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(id.clone());
    }
}

// ── Aggregation ────────────────────────────────────────────────────────────

/// Ads grouped by their day-truncated start date, split into status counts.
/// Only the platform filter applies here; days with no ads are omitted.
pub async fn ads_by_date(
    pool: &SqlitePool,
    filters: &FilterCriteria,
) -> Result<Vec<DateBucket>, sqlx::Error> {
    let mut qb = QueryBuilder::new(
        "SELECT DATE(a.start_date) AS date, \
                COUNT(*) AS count, \
                COUNT(*) FILTER (WHERE a.status = 'ACTIVE') AS active, \
                COUNT(*) FILTER (WHERE a.status = 'INACTIVE') AS inactive \
         FROM ads a",
    );
    if let Some(platform) = &filters.platform {
        qb.push(" WHERE a.id IN (SELECT ad_id FROM ad_platforms WHERE platform = ")
            .push_bind(platform.clone())
            .push(")");
    }
    qb.push(" GROUP BY DATE(a.start_date) ORDER BY date ASC");

    qb.build_query_as().fetch_all(pool).await
}

/// Distinct-ad counts per platform, busiest platform first. Only the status
/// filter applies here.
pub async fn platform_stats(
    pool: &SqlitePool,
    filters: &FilterCriteria,
) -> Result<Vec<PlatformBucket>, sqlx::Error> {
    let mut qb = QueryBuilder::new(
        "SELECT ap.platform, COUNT(DISTINCT ap.ad_id) AS count \
         FROM ad_platforms ap \
         INNER JOIN ads a ON a.id = ap.ad_id",
    );
    if let Some(status) = &filters.status {
        qb.push(" WHERE a.status = ").push_bind(status.clone());
    }
    qb.push(" GROUP BY ap.platform ORDER BY count DESC");

    qb.build_query_as().fetch_all(pool).await
}

/// The combined stats bundle: five independent read-only queries issued
/// concurrently. The two status sub-counts force ACTIVE/INACTIVE over
/// whatever status the caller filtered by.
pub async fn fetch_stats(
    pool: &SqlitePool,
    filters: &FilterCriteria,
) -> Result<AdStats, sqlx::Error> {
    let active_filters = filters.with_status(AdStatus::Active);
    let inactive_filters = filters.with_status(AdStatus::Inactive);

    let (total, active, inactive, by_date, by_platform) = tokio::try_join!(
        count_ads(pool, filters),
        count_ads(pool, &active_filters),
        count_ads(pool, &inactive_filters),
        ads_by_date(pool, filters),
        platform_stats(pool, filters),
    )?;

    Ok(AdStats {
        total,
        active,
        inactive,
        by_date,
        by_platform,
    })
}
