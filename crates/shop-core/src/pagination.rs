//! # Catalog Pagination
//!
//! Page-number parsing and the pagination metadata handed to listing views.
//! Pages past the last one are not clamped: they produce an empty page with
//! flags computed from the same formulas.

use serde::Serialize;

/// Default number of products per catalog page
pub const DEFAULT_PAGE_SIZE: u64 = 2;

/// A requested catalog page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    /// Items per page (never zero)
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Parse a raw `page` query value. Missing, non-numeric and
    /// non-positive values fall back to page 1.
    pub fn parse(raw: Option<&str>, page_size: u64) -> Self {
        let page = raw
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1);
        Self::new(page, page_size)
    }

    /// Number of items to skip
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Number of items to fetch
    pub fn limit(&self) -> u64 {
        self.page_size
    }

    /// Compute pagination metadata against a total item count
    pub fn paginate(&self, total_items: u64) -> Pagination {
        Pagination {
            total_products: total_items,
            current_page: self.page,
            has_next_page: self.offset().saturating_add(self.page_size) < total_items,
            has_previous_page: self.page > 1,
            next_page: self.page.saturating_add(1),
            previous_page: self.page - 1,
            last_page: total_items.div_ceil(self.page_size),
        }
    }
}

/// Pagination metadata rendered alongside a page of products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total_products: u64,
    pub current_page: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub next_page: u64,
    pub previous_page: u64,
    pub last_page: u64,
}
