//! Cart totals for the order summary panel.

use crate::cart::CartLineKey;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Aggregated cart figures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Σ qty × unit price.
    pub subtotal: Money,
    /// Σ qty.
    pub item_count: i64,
    /// Per-line breakdown in cart order.
    pub lines: Vec<LineTotal>,
}

impl CartTotals {
    /// "3 items" / "1 item".
    pub fn item_label(&self) -> String {
        format!(
            "{} item{}",
            self.item_count,
            if self.item_count == 1 { "" } else { "s" }
        )
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineTotal {
    pub key: CartLineKey,
    pub unit_price: Money,
    pub qty: i64,
    /// unit_price × qty.
    pub total: Money,
}
