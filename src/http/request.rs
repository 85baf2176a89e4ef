//! Request-side helpers: request IDs, request spans and query parameters.
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query values arrive as raw strings; unusable numbers fall back to defaults

use axum::{body::Body, http::Request};
use serde::Deserialize;
use tracing::Span;

use crate::catalog::{PageRequest, SortKey};
use crate::config::PaginationConfig;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Root span for one request, tagged with its request ID.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

/// Query string of `GET /country`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    /// Normalize into a page request.
    ///
    /// A missing, non-numeric or zero `page` becomes 1; the same for `limit` becomes the
    /// configured default, and a larger `limit` than allowed is clamped.
    pub fn into_page_request(self, pagination: &PaginationConfig) -> PageRequest {
        let page = parse_positive(self.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(self.limit.as_deref())
            .unwrap_or(pagination.default_page_size)
            .min(pagination.max_page_size);

        PageRequest {
            page,
            limit,
            sort: SortKey::parse(self.sort_by.as_deref()),
            search: self.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Query string of `GET /country/sorted`.
#[derive(Debug, Default, Deserialize)]
pub struct SortParams {
    pub sort_by: Option<String>,
}

impl SortParams {
    pub fn sort_key(&self) -> SortKey {
        SortKey::parse(self.sort_by.as_deref())
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw?.trim().parse::<u64>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, limit: Option<&str>) -> ListParams {
        ListParams {
            page: page.map(String::from),
            limit: limit.map(String::from),
            ..ListParams::default()
        }
    }

    #[test]
    fn test_defaults() {
        let request = ListParams::default().into_page_request(&PaginationConfig::default());
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_unusable_numbers_fall_back() {
        let config = PaginationConfig::default();
        for (page, limit) in [("abc", "xyz"), ("0", "0"), ("-2", "-5"), ("", "")] {
            let request = params(Some(page), Some(limit)).into_page_request(&config);
            assert_eq!(request.page, 1, "page {:?}", page);
            assert_eq!(request.limit, 10, "limit {:?}", limit);
        }
    }

    #[test]
    fn test_limit_clamped_to_maximum() {
        let request = params(Some("3"), Some("5000")).into_page_request(&PaginationConfig::default());
        assert_eq!(request.page, 3);
        assert_eq!(request.limit, 100);
    }

    #[test]
    fn test_blank_search_ignored() {
        let request = ListParams {
            search: Some("   ".into()),
            sort_by: Some("z_to_a".into()),
            ..ListParams::default()
        }
        .into_page_request(&PaginationConfig::default());
        assert!(request.search.is_none());
        assert_eq!(request.sort, SortKey::ZToA);
    }
}
