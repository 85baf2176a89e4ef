//! Pagination inputs and results.

use serde::Serialize;

use crate::catalog::SortKey;

/// A normalized request for one page of countries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u64,
    /// Page size, at least 1.
    pub limit: u64,
    pub sort: SortKey,
    /// Case-insensitive substring matched against name, region and subregion.
    pub search: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort: SortKey::default(),
            search: None,
        }
    }
}

impl PageRequest {
    /// Number of records preceding this page.
    pub fn skip(&self) -> u64 {
        (self.page.max(1) - 1).saturating_mul(self.limit)
    }
}

/// One page of results plus navigation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub has_next: bool,
    pub has_prev: bool,
    pub page: u64,
    pub pages: u64,
    pub per_page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(list: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let pages = total_pages(total, request.limit);
        Self {
            list,
            has_next: request.page < pages,
            has_prev: request.page > 1,
            page: request.page,
            pages,
            per_page: request.limit,
            total,
        }
    }
}

/// `ceil(total / limit)`, with a zero limit treated as one.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u64, limit: u64) -> PageRequest {
        PageRequest {
            page,
            limit,
            ..PageRequest::default()
        }
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(12, 5), 3);
    }

    #[test]
    fn test_navigation_flags() {
        let middle = Page::new(vec![(); 5], &request(2, 5), 12);
        assert!(middle.has_next);
        assert!(middle.has_prev);
        assert_eq!(middle.pages, 3);

        let last = Page::new(vec![(); 2], &request(3, 5), 12);
        assert!(!last.has_next);

        let beyond = Page::<()>::new(vec![], &request(9, 5), 12);
        assert!(!beyond.has_next);
        assert!(beyond.has_prev);

        let empty = Page::<()>::new(vec![], &request(1, 10), 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
        assert_eq!(empty.pages, 0);
    }

    #[test]
    fn test_skip() {
        assert_eq!(request(1, 10).skip(), 0);
        assert_eq!(request(3, 5).skip(), 10);
    }
}
