//! Orders module.

mod filter;
mod order;

pub use filter::{OrderFilter, StatusFilter};
pub use order::{Order, OrderItem, OrderStatus, ShippingAddress, UserSummary};
