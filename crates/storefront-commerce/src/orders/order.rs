//! Order records as returned by the orders endpoints.

use crate::ids::{OrderId, ProductId, UserId};
use crate::money::{self, Money};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Order status as shown in the admin and account screens.
///
/// Derived from the paid/delivered flags; delivery wins over payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    /// Paid, not yet delivered.
    Paid,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [OrderStatus::Pending, OrderStatus::Paid, OrderStatus::Delivered];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Paid => "Processing",
            OrderStatus::Delivered => "Delivered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "paid" | "processing" => Some(OrderStatus::Paid),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

/// The customer attached to an order, when the server populates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id", default)]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// One purchased line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub qty: i64,
    #[serde(default)]
    pub image: String,
    #[serde(with = "money::decimal")]
    pub price: Money,
    #[serde(default)]
    pub product: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default, deserialize_with = "populated_user")]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default, with = "money::decimal")]
    pub total_price: Money,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    /// Missing on orders created before timestamps were recorded.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `user` is either a populated object or a bare id; only the former carries a summary.
fn populated_user<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<UserSummary>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Populated(UserSummary),
        Id(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Populated(user)) => Some(user),
        Some(Raw::Id(id)) => Some(UserSummary {
            id: UserId::new(id),
            ..UserSummary::default()
        }),
        None => None,
    })
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        if self.is_delivered {
            OrderStatus::Delivered
        } else if self.is_paid {
            OrderStatus::Paid
        } else {
            OrderStatus::Pending
        }
    }

    /// Σ qty over all items.
    pub fn item_count(&self) -> i64 {
        self.order_items.iter().map(|i| i.qty).sum()
    }

    pub fn customer_name(&self) -> &str {
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or_default()
    }

    pub fn customer_email(&self) -> &str {
        self.user.as_ref().map(|u| u.email.as_str()).unwrap_or_default()
    }

    /// Order reference shown to customers: last six characters of the id.
    pub fn reference(&self) -> &str {
        self.id.short(6)
    }
}
