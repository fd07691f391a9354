use serde::{Deserialize, Serialize};

/// Page position and totals for a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl PaginationMeta {
    /// Builds metadata with `total_pages` derived from the item count.
    ///
    /// A zero `page_size` yields zero pages.
    pub fn from_totals(page: u32, page_size: u32, total_items: u64) -> Self {
        Self {
            page,
            page_size,
            total_pages: page_count(page_size, total_items),
            total_items,
        }
    }

    /// Whether `total_pages` agrees with `total_items` and `page_size`.
    pub fn is_consistent(&self) -> bool {
        self.total_pages == page_count(self.page_size, self.total_items)
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pages are 1-based.
    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}

fn page_count(page_size: u32, total_items: u64) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_items
        .div_ceil(u64::from(page_size))
        .try_into()
        .unwrap_or(u32::MAX)
}

/// One page of items together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, meta: PaginationMeta) -> Self {
        Self { data, meta }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names_are_camel_case() {
        let meta = PaginationMeta::from_totals(1, 20, 45);
        let value = serde_json::to_value(meta).unwrap();
        assert_eq!(
            value,
            json!({"page": 1, "pageSize": 20, "totalPages": 3, "totalItems": 45})
        );
    }

    #[test]
    fn test_from_totals_rounds_up() {
        assert_eq!(PaginationMeta::from_totals(1, 20, 40).total_pages, 2);
        assert_eq!(PaginationMeta::from_totals(1, 20, 41).total_pages, 3);
        assert_eq!(PaginationMeta::from_totals(1, 20, 0).total_pages, 0);
        assert_eq!(PaginationMeta::from_totals(1, 0, 10).total_pages, 0);
    }

    #[test]
    fn test_inconsistent_meta_is_accepted_but_detectable() {
        let meta: PaginationMeta =
            serde_json::from_value(json!({"page": 2, "pageSize": 10, "totalPages": 9, "totalItems": 15}))
                .unwrap();
        assert!(!meta.is_consistent());
        assert!(meta.has_next_page());
        assert!(meta.has_previous_page());
    }

    #[test]
    fn test_paginated_response_roundtrip_shape() {
        let page: PaginatedResponse<String> = serde_json::from_value(json!({
            "data": ["a", "b"],
            "meta": {"page": 1, "pageSize": 2, "totalPages": 1, "totalItems": 2}
        }))
        .unwrap();

        assert_eq!(page.data, vec!["a", "b"]);
        assert!(!page.meta.has_next_page());
        assert!(!page.meta.has_previous_page());
    }
}
