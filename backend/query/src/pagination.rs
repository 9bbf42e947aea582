//! Page arithmetic.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: u64,
    /// Page size, always at least 1.
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT }
    }
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page: page.max(1), limit: limit.max(1) }
    }

    /// Parse raw `page` / `limit` values. Anything that is not a positive
    /// integer falls back to the default without an error.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>, default_limit: u64) -> Self {
        Self::new(
            parse_positive(page).unwrap_or(DEFAULT_PAGE),
            parse_positive(limit).unwrap_or(default_limit),
        )
    }

    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

/// `ceil(total / limit)`; zero when there is nothing to page through.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit.max(1))
}

/// Listing metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub results: u64,
    pub total: u64,
    pub page: u64,
    pub pages: u64,
}

impl PageInfo {
    pub fn new(results: usize, total: u64, pagination: Pagination) -> Self {
        Self {
            results: results as u64,
            total,
            page: pagination.page,
            pages: total_pages(total, pagination.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_page_of_twenty_five() {
        let p = Pagination::from_raw(Some("2"), Some("10"), DEFAULT_LIMIT);
        assert_eq!(p.skip(), 10);
        assert_eq!(total_pages(25, p.limit), 3);
        assert_eq!(PageInfo::new(10, 25, p).pages, 3);
    }

    #[test]
    fn invalid_input_falls_back_to_defaults() {
        let p = Pagination::from_raw(Some("abc"), Some("0"), 10);
        assert_eq!(p, Pagination { page: 1, limit: 10 });
        let p = Pagination::from_raw(Some("-3"), None, 20);
        assert_eq!(p, Pagination { page: 1, limit: 20 });
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        let p = Pagination::from_raw(Some("1000000000000000000"), Some("100"), DEFAULT_LIMIT);
        assert_eq!(p.page, 1_000_000_000_000_000_000);
        assert_eq!(p.skip(), u64::MAX);
        assert_eq!(Pagination::new(u64::MAX, u64::MAX).skip(), u64::MAX);
    }

    #[test]
    fn empty_total_has_no_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
    }
}
