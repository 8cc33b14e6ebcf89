//! Catalog search module.
//!
//! Filter state, the query sent to the product listing endpoint, and how the
//! returned page is laid out.

mod filter;
mod presentation;
mod query;
mod results;

pub use filter::{FilterOptions, FilterState, SortChoice, SortKey, SortOrder};
pub use presentation::{
    all_buckets, page_link, present, CarouselBucket, CarouselSpec, GridView, HomeSections, Presentation, Theme,
    CAROUSELS, FEATURED_LIMIT,
};
pub use query::{AdminProductQuery, CatalogQuery, RouteParams, ADMIN_PAGE_SIZE, HOMEPAGE_PAGE_SIZE};
pub use results::{Pagination, ProductPage};
