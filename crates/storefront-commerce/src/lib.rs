//! Storefront domain types and logic.
//!
//! This crate holds everything the apparel storefront decides locally, with
//! no I/O:
//!
//! - **Catalog**: products, categories, departments, the product detail selection
//! - **Search**: filter state, the product listing query, carousels and the paginated grid
//! - **Cart**: cart lines keyed by product/size/color, subtotal and item count
//! - **Orders** and **Accounts**: records returned by the API, admin list filters, account forms
//! - **Analytics**: windowed sales report and the admin dashboard summary
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let filters = FilterState {
//!     min_price: "1000".into(),
//!     ..FilterState::default()
//! };
//! let query = CatalogQuery::build(&filters, &RouteParams::category("jeans"));
//! assert_eq!(query.category.as_deref(), Some("jeans"));
//! assert_eq!(query.page_size, None);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod account;
pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Category, ColorVariant, Department, Product, ProductDraft, ProductSelection, SizeStock};

    // Search
    pub use crate::search::{
        present, AdminProductQuery, CatalogQuery, FilterOptions, FilterState, GridView, HomeSections, Pagination, Presentation,
        ProductPage, RouteParams, SortChoice, SortKey, SortOrder,
    };

    // Cart
    pub use crate::cart::{Cart, CartLine, CartLineKey, CartTotals};

    // Orders and accounts
    pub use crate::account::{LoginRequest, ProfileUpdate, RegistrationForm, Role, User, UserFilter};
    pub use crate::orders::{Order, OrderFilter, OrderItem, OrderStatus, StatusFilter};

    // Analytics
    pub use crate::analytics::{AnalyticsReport, AnalyticsWindow, DashboardStats};
}
