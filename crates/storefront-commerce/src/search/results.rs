//! Product listing page and pagination.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

/// One page of `GET /api/products`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

impl Default for ProductPage {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            page: 1,
            pages: 1,
            total: 0,
        }
    }
}

impl ProductPage {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_server(self.page, self.pages, self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Pagination info as reported by the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Total number of matching items.
    pub total: u64,
}

impl Pagination {
    /// Normalize server figures: at least one page, page within range.
    pub fn from_server(page: u32, pages: u32, total: u64) -> Self {
        let pages = pages.max(1);
        Self {
            page: page.clamp(1, pages),
            pages,
            total,
        }
    }

    /// Compute pages from a total and page size.
    pub fn from_total(page: u32, per_page: u32, total: u64) -> Self {
        let per_page = u64::from(per_page.max(1));
        let pages = total.div_ceil(per_page).max(1);
        Self::from_server(page, u32::try_from(pages).unwrap_or(u32::MAX), total)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a pager should be shown at all.
    pub fn is_paged(&self) -> bool {
        self.pages > 1
    }

    /// Page numbers for display, a window of at most `max_visible` around the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<u32> {
        let max_visible = max_visible.max(1) as u32;
        if self.pages <= max_visible {
            return (1..=self.pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_server(1, 1, 0)
    }
}
