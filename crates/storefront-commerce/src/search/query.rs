//! Catalog query builder.
//!
//! Turns the filter state and the route into the query object sent to
//! `GET /api/products`. Fields at their default value are omitted, never
//! sent as empty strings.

use crate::catalog::Department;
use crate::search::{FilterState, SortKey, SortOrder};
use serde::{Deserialize, Serialize};

/// Page size requested on the unfiltered homepage so every carousel fills from one response.
pub const HOMEPAGE_PAGE_SIZE: u32 = 200;

/// Page size of the admin product table.
pub const ADMIN_PAGE_SIZE: u32 = 12;

/// Parameters captured from the catalog route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub page_number: Option<u32>,
}

impl RouteParams {
    pub fn home() -> Self {
        Self::default()
    }

    pub fn search(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().filter(|k| !k.is_empty())
    }

    pub fn category_slug(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// Neither keyword nor category: the carousel homepage.
    pub fn is_homepage(&self) -> bool {
        self.keyword().is_none() && self.category_slug().is_none()
    }
}

/// The normalized query object for the product listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub page_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl CatalogQuery {
    /// Build the storefront query with the standard homepage page size.
    pub fn build(filters: &FilterState, route: &RouteParams) -> Self {
        Self::build_with(filters, route, HOMEPAGE_PAGE_SIZE)
    }

    /// Build the storefront query with an explicit homepage page size.
    pub fn build_with(filters: &FilterState, route: &RouteParams, homepage_page_size: u32) -> Self {
        let defaults = FilterState::default();

        let mut query = Self {
            category: non_empty(&filters.category),
            brand: non_empty(&filters.brand),
            min_price: non_empty(&filters.min_price),
            max_price: non_empty(&filters.max_price),
            color: non_empty(&filters.color),
            size: non_empty(&filters.size),
            in_stock: filters.in_stock.then_some(true),
            featured: filters.featured.then_some(true),
            sort_by: (filters.sort_by != defaults.sort_by).then_some(filters.sort_by),
            sort_order: (filters.sort_order != defaults.sort_order).then_some(filters.sort_order),
            page_number: route.page_number.filter(|p| *p > 0).unwrap_or(1),
            ..Self::default()
        };

        if let Some(keyword) = route.keyword() {
            query.keyword = Some(keyword.to_string());
        }
        if let Some(category) = route.category_slug() {
            query.category = Some(category.to_string());
        }
        if route.is_homepage() {
            query.page_size = Some(homepage_page_size);
        }

        query
    }

    /// Wire pairs in a stable order, omitted fields absent.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |name: &'static str, value: Option<String>| {
            if let Some(v) = value {
                pairs.push((name, v));
            }
        };

        push("category", self.category.clone());
        push("mainCategory", self.main_category.clone());
        push("brand", self.brand.clone());
        push("minPrice", self.min_price.clone());
        push("maxPrice", self.max_price.clone());
        push("color", self.color.clone());
        push("size", self.size.clone());
        push("inStock", self.in_stock.map(|b| b.to_string()));
        push("featured", self.featured.map(|b| b.to_string()));
        push("sortBy", self.sort_by.map(|k| k.as_str().to_string()));
        push("sortOrder", self.sort_order.map(|o| o.as_str().to_string()));
        push("keyword", self.keyword.clone());
        push("pageNumber", Some(self.page_number.to_string()));
        push("pageSize", self.page_size.map(|s| s.to_string()));

        pairs
    }
}

/// Admin product table query: debounced search, department, sub-category, page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminProductQuery {
    pub search: String,
    pub department: Option<Department>,
    pub category: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for AdminProductQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            department: None,
            category: None,
            page: 1,
            page_size: ADMIN_PAGE_SIZE,
        }
    }
}

impl AdminProductQuery {
    /// New search term; back to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// New department; the sub-category no longer applies.
    pub fn set_department(&mut self, department: Option<Department>) {
        self.department = department;
        self.category = None;
        self.page = 1;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.is_empty());
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Sub-categories offered by the second dropdown.
    pub fn available_categories(&self) -> &'static [&'static str] {
        self.department.map(|d| d.categories()).unwrap_or(&[])
    }

    pub fn to_catalog_query(&self) -> CatalogQuery {
        CatalogQuery {
            keyword: non_empty(&self.search),
            main_category: self.department.map(|d| d.as_str().to_string()),
            category: self.category.clone(),
            page_number: self.page,
            page_size: Some(self.page_size),
            ..CatalogQuery::default()
        }
    }
}
