//! Client-side filtering of the admin order list.

use crate::orders::Order;

/// Status dropdown on the admin order list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Not paid yet.
    Pending,
    /// Paid, not delivered.
    Paid,
    Delivered,
}

impl StatusFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(StatusFilter::Pending),
            "paid" | "processing" => Some(StatusFilter::Paid),
            "delivered" => Some(StatusFilter::Delivered),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::Pending => "Pending Payment",
            StatusFilter::Paid => "Processing (Paid)",
            StatusFilter::Delivered => "Delivered",
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        match self {
            StatusFilter::Pending => !order.is_paid,
            StatusFilter::Paid => order.is_paid && !order.is_delivered,
            StatusFilter::Delivered => order.is_delivered,
        }
    }
}

/// Search term and status filter for the admin order list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub search: String,
    pub status: Option<StatusFilter>,
}

impl OrderFilter {
    /// Case-insensitive match on order id, customer name or customer email.
    pub fn matches(&self, order: &Order) -> bool {
        let search = self.search.trim().to_lowercase();
        let matches_search = search.is_empty()
            || order.id.as_str().to_lowercase().contains(&search)
            || order.customer_name().to_lowercase().contains(&search)
            || order.customer_email().to_lowercase().contains(&search);

        matches_search && self.status.map_or(true, |s| s.matches(order))
    }

    /// Matching orders, server order preserved.
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}
