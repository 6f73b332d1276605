//! Offset pagination utilities.

use serde::{Deserialize, Serialize};

/// Hard cap on page size; larger requests are clamped, not rejected.
pub const MAX_PER_PAGE: i64 = 100;

/// Page size used when the requested value is missing or nonsensical.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Incoming pagination parameters, before clamping.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl PageQuery {
    /// Effective page number: minimum 1.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size: values above [`MAX_PER_PAGE`] clamp to the cap,
    /// values below 1 fall back to [`DEFAULT_PER_PAGE`].
    pub fn per_page(&self) -> i64 {
        match self.per_page.unwrap_or(DEFAULT_PER_PAGE) {
            n if n > MAX_PER_PAGE => MAX_PER_PAGE,
            n if n < 1 => DEFAULT_PER_PAGE,
            n => n,
        }
    }

    /// SQL offset for the effective page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

/// Pagination metadata returned alongside a page of items.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PageMeta {
    /// Builds metadata for a result set, bumping `total_pages` when the last
    /// page is partial.
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let mut total_pages = total / per_page;
        if total % per_page > 0 {
            total_pages += 1;
        }
        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: i64, per_page: i64) -> PageQuery {
        PageQuery {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    #[test]
    fn test_per_page_clamped_to_max() {
        assert_eq!(query(1, 500).per_page(), 100);
        assert_eq!(query(1, 101).per_page(), 100);
        assert_eq!(query(1, 100).per_page(), 100);
    }

    #[test]
    fn test_per_page_defaults_when_below_one() {
        assert_eq!(query(1, 0).per_page(), 10);
        assert_eq!(query(1, -5).per_page(), 10);
    }

    #[test]
    fn test_per_page_in_range_passes_through() {
        assert_eq!(query(1, 25).per_page(), 25);
    }

    #[test]
    fn test_page_clamped_to_minimum_one() {
        assert_eq!(query(0, 10).page(), 1);
        assert_eq!(query(-3, 10).page(), 1);
        assert_eq!(query(7, 10).page(), 7);
    }

    #[test]
    fn test_missing_params_use_defaults() {
        let q = PageQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(), 10);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(query(1, 10).offset(), 0);
        assert_eq!(query(3, 10).offset(), 20);
        assert_eq!(query(2, 100).offset(), 100);
    }

    #[test]
    fn test_total_pages_with_remainder_bump() {
        assert_eq!(PageMeta::new(25, 1, 10).total_pages, 3);
    }

    #[test]
    fn test_total_pages_exact_division() {
        assert_eq!(PageMeta::new(20, 1, 10).total_pages, 2);
    }

    #[test]
    fn test_total_pages_empty() {
        assert_eq!(PageMeta::new(0, 1, 10).total_pages, 0);
    }

    #[test]
    fn test_page_query_deserializes_from_url_params() {
        let q: PageQuery = serde_json::from_str(r#"{"page": 2, "per_page": 50}"#).unwrap();
        assert_eq!(q.page(), 2);
        assert_eq!(q.per_page(), 50);
    }
}
