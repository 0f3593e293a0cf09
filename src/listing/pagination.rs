//! Pagination

use serde::Serialize;

/// Page used when none is requested.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when none is requested.
pub const DEFAULT_LIMIT: u64 = 50;

/// A requested page; both page and limit are at least 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a page request, clamping both values to at least 1.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Parse raw `page` / `limit` parameters.
    ///
    /// Missing, non-numeric and zero values fall back to the defaults;
    /// negative values clamp to 1.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            parse_positive(page, DEFAULT_PAGE),
            parse_positive(limit, DEFAULT_LIMIT),
        )
    }

    /// 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Page size.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Describe this page within a result set of `total` rows.
    pub fn paginate(&self, total: u64) -> Pagination {
        let skip = self.offset();

        Pagination {
            current_page: self.page,
            limit: self.limit,
            number_of_pages: total.div_ceil(self.limit).max(1),
            next: (skip.saturating_add(self.limit) < total).then(|| self.page + 1),
            prev: (skip > 0).then(|| self.page - 1),
        }
    }
}

fn parse_positive(raw: Option<&str>, default: u64) -> u64 {
    match raw.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(0) | Err(_)) | None => default,
        Some(Ok(value)) => u64::try_from(value).unwrap_or(1),
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Requested page.
    pub current_page: u64,

    /// Page size.
    pub limit: u64,

    /// Total pages; 1 for an empty result set.
    pub number_of_pages: u64,

    /// Next page, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<u64>,

    /// Previous page, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<u64>,
}
