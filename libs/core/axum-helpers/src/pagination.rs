//! The `{data, metadata}` envelope returned by every list endpoint.

use serde::Serialize;
use utoipa::ToSchema;

/// Pagination metadata for list responses.
///
/// `total` is the count of rows matching the filter set with no pagination
/// window applied; `page` and `total_pages` are derived from it. Both are
/// well-defined for `limit == 0` (page 1, zero pages) even though request
/// validation normally rejects that value before it reaches here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMetadata {
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl PaginationMetadata {
    pub fn new(total: u64, skip: u64, limit: u64) -> Self {
        let page = if limit > 0 { skip / limit + 1 } else { 1 };
        let total_pages = if limit > 0 { total.div_ceil(limit) } else { 0 };

        Self {
            total,
            skip,
            limit,
            page,
            total_pages,
        }
    }
}

/// A page of results plus its pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub metadata: PaginationMetadata,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: u64, skip: u64, limit: u64) -> Self {
        Self {
            data,
            metadata: PaginationMetadata::new(total, skip, limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let m = PaginationMetadata::new(25, 0, 10);
        assert_eq!(m.page, 1);
        assert_eq!(m.total_pages, 3);
    }

    #[test]
    fn test_middle_page() {
        let m = PaginationMetadata::new(25, 10, 10);
        assert_eq!(m.page, 2);
        assert_eq!(m.total_pages, 3);
    }

    #[test]
    fn test_partial_skip_stays_on_page() {
        // skip 15 with limit 10 is still "page 2" by floor division
        let m = PaginationMetadata::new(25, 15, 10);
        assert_eq!(m.page, 2);
    }

    #[test]
    fn test_exact_division() {
        let m = PaginationMetadata::new(30, 0, 10);
        assert_eq!(m.total_pages, 3);
    }

    #[test]
    fn test_empty_result() {
        let m = PaginationMetadata::new(0, 0, 10);
        assert_eq!(m.page, 1);
        assert_eq!(m.total_pages, 0);
    }

    #[test]
    fn test_zero_limit_fallbacks() {
        let m = PaginationMetadata::new(25, 40, 0);
        assert_eq!(m.page, 1);
        assert_eq!(m.total_pages, 0);
    }

    #[test]
    fn test_single_row() {
        let m = PaginationMetadata::new(1, 0, 100);
        assert_eq!(m.page, 1);
        assert_eq!(m.total_pages, 1);
    }
}
