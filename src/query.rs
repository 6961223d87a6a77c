use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

use crate::models::AdStatus;

// ── Filters ────────────────────────────────────────────────────────────────

/// The optional predicate set applied to ad queries. Absent fields contribute
/// nothing; present fields append exactly one predicate each, ANDed.
///
/// `status` is carried as the raw string from the query string and bound
/// verbatim, so an unrecognized value matches no rows instead of failing the
/// request.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub status: Option<String>,
    pub platform: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page_name: Option<String>,
}

impl FilterCriteria {
    /// Copy of these filters with the status forced to `status`, discarding
    /// whatever the caller supplied. Used by the stats sub-counts.
    pub fn with_status(&self, status: AdStatus) -> Self {
        Self {
            status: Some(status.as_str().to_owned()),
            ..self.clone()
        }
    }

    /// Append the platform join to a query whose FROM clause aliases `ads`
    /// as `a`. Platform is a one-to-many association, so narrowing happens in
    /// the join condition; callers must select/count DISTINCT over `a.id` to
    /// keep the join from fanning out.
    pub fn push_platform_join(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(platform) = &self.platform {
            qb.push(" INNER JOIN ad_platforms ap ON ap.ad_id = a.id AND ap.platform = ")
                .push_bind(platform.clone());
        }
    }

    /// Append the WHERE clause for the non-platform filters. SQL text and
    /// bind values travel together through the builder, so the rendered
    /// placeholders can never get out of step with the argument sequence.
    pub fn push_predicates(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        let mut prefix = " WHERE ";

        if let Some(status) = &self.status {
            qb.push(prefix).push("a.status = ").push_bind(status.clone());
            prefix = " AND ";
        }

        if let Some(start_date) = self.start_date {
            qb.push(prefix).push("a.start_date >= ").push_bind(start_date);
            prefix = " AND ";
        }

        if let Some(end_date) = self.end_date {
            qb.push(prefix).push("a.end_date <= ").push_bind(end_date);
            prefix = " AND ";
        }

        if let Some(page_name) = &self.page_name {
            // Contains match; LIKE is case-insensitive for ASCII in SQLite.
            qb.push(prefix)
                .push("a.page_name LIKE ")
                .push_bind(format!("%{page_name}%"));
        }
    }
}

// ── Pagination ─────────────────────────────────────────────────────────────

/// 1-based page number and page size controlling which slice of a filtered
/// result set is returned.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 50;

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn offset(self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// `ceil(total / limit)`; zero when nothing matched.
    pub fn total_pages(self, total: i64) -> i64 {
        let limit = i64::from(self.limit);
        (total + limit - 1) / limit
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
