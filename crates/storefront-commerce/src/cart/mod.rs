//! Shopping cart module.
//!
//! Contains cart lines keyed by product/size/color and the totals reducer.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine, CartLineKey, FALLBACK_QUANTITY_CHOICES, MAX_QUANTITY_CHOICES};
pub use pricing::{CartTotals, LineTotal};
