//! Client-side state for the storefront.
//!
//! [`Store`] holds four slices (user, cart, product, order) that change only
//! through [`Store::dispatch`]. [`Storefront`] drives remote calls through a
//! [`StoreGateway`](storefront_data::StoreGateway): each call dispatches a
//! pending action, then a fulfilled or rejected one. The [`RequestTracker`]
//! tickets every call so that, under [`StalePolicy::LatestRequestWins`], a slow
//! response cannot overwrite a newer one.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_data::{FetchClient, HttpGateway};
//! use storefront_state::{Route, Storefront};
//! use storefront_commerce::search::FilterState;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = HttpGateway::new(FetchClient::new()?.with_base_url("http://localhost:5000"));
//! let storefront = Storefront::new(Arc::new(gateway));
//!
//! if let Some(params) = Route::parse("/category/jeans").catalog_params() {
//!     let page = storefront.browse(&FilterState::default(), &params).await?;
//!     println!("{} products", page.total);
//! }
//! # Ok(())
//! # }
//! ```

mod debounce;
mod error;
mod request;
mod route;
mod store;
mod storefront;

pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use error::StateError;
pub use request::{RequestKind, RequestTracker, StalePolicy, Ticket};
pub use route::{Access, AdminRoute, Route};
pub use store::{
    Action, CartAction, CartSlice, OrderAction, OrderSlice, ProductAction, ProductSlice, Store, UserAction, UserSlice,
};
pub use storefront::{StoreConfig, Storefront};
