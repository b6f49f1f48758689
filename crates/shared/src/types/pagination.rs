//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u64,
    /// Sort key; unknown keys fall back to date-descending.
    pub sort: Option<String>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    20
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            sort: None,
        }
    }
}

impl PageQuery {
    /// Returns the page number, clamped to at least 1.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }

    /// Returns the page size, clamped to at least 1.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit.max(1)
    }

    /// Calculates the offset for database queries.
    ///
    /// Saturates at `u64::MAX` for absurd client-supplied page numbers
    /// instead of overflowing.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page().saturating_sub(1).saturating_mul(self.limit())
    }

    /// Resolves the requested sort key.
    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort.as_deref().map_or(SortKey::DateDesc, SortKey::from_key)
    }
}

/// Sort orders supported by paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Newest first (the default).
    DateDesc,
    /// Oldest first.
    DateAsc,
    /// Most expensive first.
    CostDesc,
    /// Cheapest first.
    CostAsc,
}

impl SortKey {
    /// Maps a query-string key to a sort order.
    ///
    /// Unknown keys silently fall back to [`SortKey::DateDesc`]; this is the
    /// specified behavior, not an error.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "date_asc" => Self::DateAsc,
            "cost_desc" => Self::CostDesc,
            "cost_asc" => Self::CostAsc,
            _ => Self::DateDesc,
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Current page number.
    pub current_page: u64,
    /// Items per page.
    pub limit: u64,
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Pagination metadata.
    pub metadata: PageMeta,
    /// The items in the current page.
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Creates a paginated response.
    ///
    /// A page past the end of the data carries an empty `data` vector with
    /// accurate metadata.
    #[must_use]
    pub fn new(data: Vec<T>, query: &PageQuery, total_items: u64) -> Self {
        let limit = query.limit();
        Self {
            metadata: PageMeta {
                total_items,
                total_pages: total_items.div_ceil(limit),
                current_page: query.page(),
                limit,
            },
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn query(page: u64, limit: u64) -> PageQuery {
        PageQuery {
            page,
            limit,
            sort: None,
        }
    }

    #[test]
    fn test_offset() {
        assert_eq!(query(1, 20).offset(), 0);
        assert_eq!(query(3, 20).offset(), 40);
        assert_eq!(query(2, 7).offset(), 7);
    }

    #[test]
    fn test_offset_saturates_instead_of_overflowing() {
        assert_eq!(query(u64::MAX, 2).offset(), u64::MAX);
        assert_eq!(query(u64::MAX, u64::MAX).offset(), u64::MAX);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let p = Paginated::new(vec![1, 2, 3], &query(1, 20), 41);
        assert_eq!(p.metadata.total_pages, 3);

        let p = Paginated::new(vec![1], &query(1, 20), 40);
        assert_eq!(p.metadata.total_pages, 2);
    }

    #[test]
    fn test_zero_items_zero_pages() {
        let p = Paginated::<u32>::new(vec![], &query(1, 20), 0);
        assert_eq!(p.metadata.total_pages, 0);
        assert_eq!(p.metadata.total_items, 0);
        assert!(p.data.is_empty());
    }

    #[test]
    fn test_unknown_sort_key_falls_back_to_date_desc() {
        assert_eq!(SortKey::from_key("date_asc"), SortKey::DateAsc);
        assert_eq!(SortKey::from_key("cost_desc"), SortKey::CostDesc);
        assert_eq!(SortKey::from_key("cost_asc"), SortKey::CostAsc);
        assert_eq!(SortKey::from_key("date_desc"), SortKey::DateDesc);
        assert_eq!(SortKey::from_key("garbage"), SortKey::DateDesc);
        assert_eq!(SortKey::from_key(""), SortKey::DateDesc);
    }

    #[test]
    fn test_default_sort_is_date_desc() {
        assert_eq!(PageQuery::default().sort_key(), SortKey::DateDesc);
    }

    proptest! {
        /// Paging over a fixed sequence covers every item exactly once and
        /// `total_pages` matches the ceiling division.
        #[test]
        fn prop_pages_partition_items(total in 0usize..500, limit in 1u64..50) {
            let items: Vec<usize> = (0..total).collect();
            let total_items = items.len() as u64;
            let total_pages = total_items.div_ceil(limit);

            let mut seen = Vec::new();
            for page in 1..=total_pages.max(1) {
                let q = query(page, limit);
                let start = usize::try_from(q.offset()).unwrap().min(items.len());
                let end = (start + usize::try_from(limit).unwrap()).min(items.len());
                let window = items[start..end].to_vec();

                let response = Paginated::new(window.clone(), &q, total_items);
                prop_assert_eq!(response.metadata.total_pages, total_pages);
                prop_assert_eq!(response.metadata.current_page, page);
                seen.extend(window);
            }

            prop_assert_eq!(seen, items);
        }

        /// Pages past the end are empty, never an error.
        #[test]
        fn prop_page_past_end_is_empty(total in 0u64..100, limit in 1u64..50) {
            let past_end = total.div_ceil(limit) + 1;
            let q = query(past_end, limit);
            prop_assert!(q.offset() >= total);

            let response = Paginated::<u64>::new(vec![], &q, total);
            prop_assert_eq!(response.metadata.total_items, total);
            prop_assert!(response.data.is_empty());
        }
    }
}
