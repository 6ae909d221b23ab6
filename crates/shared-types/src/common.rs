use serde::{Deserialize, Serialize};

/// Default page size used by list pages.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Paginated response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            1
        };
        let has_next = page < total_pages;
        let has_prev = page > 1;

        Self {
            data: items,
            meta: PaginationMeta {
                page,
                limit,
                total,
                total_pages,
                has_next,
                has_prev,
            },
        }
    }
}

/// Helper to normalize pagination params with safe defaults.
pub fn normalize_pagination(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);
    (page, limit)
}

/// `{ "id": ... }` body the school backend returns after a create.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub students: i64,
    pub open_sessions: i64,
    pub unpaid_invoices: i64,
}

/// Trim a free-text filter and drop it when empty.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_meta_is_derived_from_total() {
        let page: PaginatedResponse<i32> = PaginatedResponse::new(vec![1, 2], 2, 10, 25);
        assert_eq!(page.meta.total_pages, 3);
        assert!(page.meta.has_next);
        assert!(page.meta.has_prev);

        let last: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 3, 10, 25);
        assert!(!last.meta.has_next);
    }

    #[test]
    fn normalize_pagination_clamps() {
        assert_eq!(normalize_pagination(None, None), (1, DEFAULT_PAGE_SIZE));
        assert_eq!(normalize_pagination(Some(0), Some(500)), (1, 100));
        assert_eq!(normalize_pagination(Some(4), Some(0)), (4, 1));
    }

    #[test]
    fn non_empty_drops_blank_filters() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" dupont ".into())), Some("dupont".into()));
        assert_eq!(non_empty(None), None);
    }
}
