//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_NUMBER, MAX_PAGE_SIZE};

/// Pagination query parameters (`?page=&limit=`), shared by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: u64, limit: u64) -> Self {
        Self { page, limit }
    }

    /// From optional `page`/`limit` query values, falling back to defaults.
    pub fn from_query(page: Option<u64>, limit: Option<u64>) -> Self {
        Self::new(
            page.unwrap_or(DEFAULT_PAGE_NUMBER),
            limit.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// Page number, clamped to `1..=MAX_PAGE_NUMBER`
    pub fn page(&self) -> u64 {
        self.page.clamp(1, MAX_PAGE_NUMBER)
    }

    /// Get limit capped at maximum (and at least 1)
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper: `{data, pagination}`
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, params: &PaginationParams, total: u64) -> Self {
        let limit = params.limit();
        Self {
            data,
            pagination: PaginationMeta {
                total,
                page: params.page(),
                limit,
                total_pages: total.div_ceil(limit),
            },
        }
    }

    /// Convert the items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huge_page_keeps_offset_in_range() {
        let params = PaginationParams::new(u64::MAX, MAX_PAGE_SIZE);
        assert_eq!(params.page(), MAX_PAGE_NUMBER);

        let offset = (params.page() - 1).checked_mul(params.limit());
        assert!(offset.is_some_and(|o| o <= i64::MAX as u64));
    }

    #[test]
    fn test_limit_is_capped_and_page_floored() {
        let params = PaginationParams::new(0, 5000);
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_from_query_defaults() {
        let params = PaginationParams::from_query(None, Some(25));
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 25);
        assert_eq!(PaginationParams::from_query(None, None).limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Paginated::new(vec![1, 2, 3], &PaginationParams::new(1, 10), 21);
        assert_eq!(page.pagination.total_pages, 3);

        let empty: Paginated<i32> = Paginated::new(vec![], &PaginationParams::default(), 0);
        assert_eq!(empty.pagination.total_pages, 0);
    }

    #[test]
    fn test_serialized_shape() {
        let page = Paginated::new(vec!["a"], &PaginationParams::new(2, 1), 2);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["pagination"]["totalPages"], 2);
        assert_eq!(json["pagination"]["page"], 2);
        assert_eq!(json["data"][0], "a");
    }
}
