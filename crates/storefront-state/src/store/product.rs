//! Product slice: listing page, product detail, filter options and admin edits.

use storefront_commerce::catalog::Product;
use storefront_commerce::ids::ProductId;
use storefront_commerce::search::{FilterOptions, Pagination, ProductPage};

#[derive(Debug, Clone, PartialEq)]
pub struct ProductSlice {
    pub products: Vec<Product>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    /// Product on the detail screen.
    pub product: Option<Product>,
    pub related: Vec<Product>,
    pub filter_options: FilterOptions,
    pub loading: bool,
    pub error: Option<String>,
    /// Set after an admin create/update/delete succeeds.
    pub success: bool,
}

impl Default for ProductSlice {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            page: 1,
            pages: 1,
            total: 0,
            product: None,
            related: Vec::new(),
            filter_options: FilterOptions::default(),
            loading: false,
            error: None,
            success: false,
        }
    }
}

impl ProductSlice {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_server(self.page, self.pages, self.total)
    }

    /// The current listing as a page, for presentation.
    pub fn to_page(&self) -> ProductPage {
        ProductPage {
            products: self.products.clone(),
            page: self.page,
            pages: self.pages,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    Pending,
    ListFulfilled(ProductPage),
    DetailFulfilled(Product),
    RelatedFulfilled(Vec<Product>),
    FilterOptionsFulfilled(FilterOptions),
    Created(Product),
    Updated(Product),
    Deleted(ProductId),
    Rejected(String),
    DismissError,
    ResetSuccess,
}

pub fn reduce(slice: &mut ProductSlice, action: ProductAction) {
    match action {
        ProductAction::Pending => {
            slice.loading = true;
            slice.error = None;
        }
        ProductAction::ListFulfilled(page) => {
            slice.loading = false;
            slice.products = page.products;
            slice.page = page.page;
            slice.pages = page.pages;
            slice.total = page.total;
        }
        ProductAction::DetailFulfilled(product) => {
            slice.loading = false;
            slice.product = Some(product);
        }
        ProductAction::RelatedFulfilled(related) => {
            slice.related = related;
        }
        ProductAction::FilterOptionsFulfilled(options) => {
            slice.filter_options = options;
        }
        ProductAction::Created(product) => {
            slice.loading = false;
            slice.success = true;
            slice.products.insert(0, product);
            slice.total += 1;
        }
        ProductAction::Updated(product) => {
            slice.loading = false;
            slice.success = true;
            if let Some(existing) = slice.products.iter_mut().find(|p| p.id == product.id) {
                *existing = product.clone();
            }
            if slice.product.as_ref().is_some_and(|p| p.id == product.id) {
                slice.product = Some(product);
            }
        }
        ProductAction::Deleted(id) => {
            slice.loading = false;
            slice.success = true;
            let before = slice.products.len();
            slice.products.retain(|p| p.id != id);
            if slice.products.len() < before {
                slice.total = slice.total.saturating_sub(1);
            }
            if slice.product.as_ref().is_some_and(|p| p.id == id) {
                slice.product = None;
            }
        }
        ProductAction::Rejected(message) => {
            slice.loading = false;
            slice.error = Some(message);
        }
        ProductAction::DismissError => slice.error = None,
        ProductAction::ResetSuccess => slice.success = false,
    }
}
