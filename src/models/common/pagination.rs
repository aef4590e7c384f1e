use serde::{Deserialize, Serialize};

// Informasi pagination pada respons list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub page_size: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationInfo {
    pub fn new(page: i64, page_size: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + page_size - 1) / page_size
        };
        Self {
            current_page: page,
            total_pages,
            total_items,
            page_size,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Normalisasi parameter page/limit: page minimal 1, limit 1..=100
pub fn parse_pagination(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(10).clamp(1, 100);
    (page, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_info() {
        let info = PaginationInfo::new(2, 10, 35);
        assert_eq!(info.total_pages, 4);
        assert!(info.has_next);
        assert!(info.has_prev);
    }

    #[test]
    fn test_parse_pagination_clamps() {
        assert_eq!(parse_pagination(None, None), (1, 10));
        assert_eq!(parse_pagination(Some(0), Some(1000)), (1, 100));
        assert_eq!(parse_pagination(Some(3), Some(25)), (3, 25));
    }
}
