use serde::{Deserialize, Serialize};

/// Page metadata for a feed response.
///
/// Pure arithmetic over (total item count, page size, requested page):
/// the database never sees the page number, only the derived offset.
/// Pages past the end are empty pages, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    pub fn new(total_items: u64, page_size: u32, page: u32) -> Self {
        let page = page.max(1);
        let size = u64::from(page_size.max(1));
        let total_pages = (total_items.div_ceil(size)) as u32;

        PageInfo {
            page,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// SQL OFFSET for a 1-based page number
pub fn page_offset(page: u32, page_size: u32) -> i64 {
    i64::from(page.max(1) - 1) * i64::from(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_items_page_size_ten() {
        let first = PageInfo::new(13, 10, 1);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let second = PageInfo::new(13, 10, 2);
        assert!(!second.has_next);
        assert!(second.has_prev);

        let third = PageInfo::new(13, 10, 3);
        assert!(!third.has_next);
        assert_eq!(third.total_pages, 2);
    }

    #[test]
    fn test_exact_multiple() {
        let info = PageInfo::new(20, 10, 2);
        assert_eq!(info.total_pages, 2);
        assert!(!info.has_next);
    }

    #[test]
    fn test_empty_set() {
        let info = PageInfo::new(0, 10, 1);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next);
        assert!(!info.has_prev);
    }

    #[test]
    fn test_page_zero_treated_as_first() {
        let info = PageInfo::new(5, 10, 0);
        assert_eq!(info.page, 1);
        assert!(!info.has_prev);
        assert_eq!(page_offset(0, 10), 0);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(2, 10), 10);
        assert_eq!(page_offset(3, 25), 50);
    }
}
