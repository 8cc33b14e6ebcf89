//! Admin dashboard: all-time totals and the recent activity feed.

use crate::account::User;
use crate::analytics::AnalyticsWindow;
use crate::error::CommerceError;
use crate::money::{self, Currency, Money};
use crate::orders::Order;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Orders and users each contribute at most this many entries.
const ACTIVITY_PER_SOURCE: usize = 3;

/// Length of the activity feed.
pub const ACTIVITY_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_products: u64,
    pub total_orders: usize,
    pub total_revenue: Money,
    /// Revenue over the last 30 days.
    pub monthly_revenue: Money,
}

impl DashboardStats {
    pub fn compute(
        orders: &[Order],
        users: &[User],
        total_products: u64,
        now: DateTime<Utc>,
    ) -> Result<Self, CommerceError> {
        let zero = Money::zero(Currency::default());
        let month = AnalyticsWindow::Month;

        let (total_revenue, monthly_revenue) =
            orders.iter().try_fold((zero, zero), |(all, recent), order| {
                let all = all.try_add(&order.total_price).ok_or(CommerceError::Overflow)?;
                let recent = if order.created_at.is_some_and(|at| month.contains(at, now)) {
                    recent.try_add(&order.total_price).ok_or(CommerceError::Overflow)?
                } else {
                    recent
                };
                Ok::<_, CommerceError>((all, recent))
            })?;

        Ok(Self {
            total_users: users.len(),
            total_products,
            total_orders: orders.len(),
            total_revenue,
            monthly_revenue,
        })
    }
}

/// Server-computed dashboard totals from `GET /api/users/dashboard-stats`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_users: usize,
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub total_orders: usize,
    #[serde(default, with = "money::decimal")]
    pub total_revenue: Money,
    #[serde(default, with = "money::decimal")]
    pub monthly_revenue: Money,
    #[serde(default)]
    pub recent_orders: Vec<Order>,
    #[serde(default)]
    pub recent_users: Vec<User>,
}

impl DashboardSummary {
    /// Totals as sent, with the activity feed built from the recent lists.
    pub fn into_dashboard(self, now: DateTime<Utc>) -> (DashboardStats, Vec<ActivityEntry>) {
        let activity = recent_activity(&self.recent_orders, &self.recent_users, now);
        let stats = DashboardStats {
            total_users: self.total_users,
            total_products: self.total_products,
            total_orders: self.total_orders,
            total_revenue: self.total_revenue,
            monthly_revenue: self.monthly_revenue,
        };
        (stats, activity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Order,
    User,
    Info,
}

/// One line of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub message: String,
    pub details: String,
    pub time: DateTime<Utc>,
}

/// Newest orders and sign-ups merged, newest first.
///
/// Orders and users without a creation time are stamped with `now`. An empty feed gets a
/// single welcome entry.
pub fn recent_activity(orders: &[Order], users: &[User], now: DateTime<Utc>) -> Vec<ActivityEntry> {
    let mut newest_orders: Vec<(&Order, DateTime<Utc>)> =
        orders.iter().map(|o| (o, o.created_at.unwrap_or(now))).collect();
    newest_orders.sort_by(|a, b| b.1.cmp(&a.1));

    let mut newest_users: Vec<(&User, DateTime<Utc>)> =
        users.iter().map(|u| (u, u.created_at.unwrap_or(now))).collect();
    newest_users.sort_by(|a, b| b.1.cmp(&a.1));

    let mut entries: Vec<ActivityEntry> = newest_orders
        .into_iter()
        .take(ACTIVITY_PER_SOURCE)
        .map(|(order, time)| ActivityEntry {
            kind: ActivityKind::Order,
            message: "New order received".into(),
            details: format!("Order #{} - {}", order.reference(), order.total_price),
            time,
        })
        .chain(
            newest_users
                .into_iter()
                .take(ACTIVITY_PER_SOURCE)
                .map(|(user, time)| ActivityEntry {
                    kind: ActivityKind::User,
                    message: "User registered".into(),
                    details: format!("{} - {}", user.email, user.name),
                    time,
                }),
        )
        .collect();

    if entries.is_empty() {
        return vec![ActivityEntry {
            kind: ActivityKind::Info,
            message: "Welcome to the dashboard".into(),
            details: "No recent activity to display".into(),
            time: now,
        }];
    }

    entries.sort_by(|a, b| b.time.cmp(&a.time));
    entries.truncate(ACTIVITY_LIMIT);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::OrderId;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 30, 12, 0, 0).unwrap()
    }

    fn order(id: &str, hours_ago: i64, total: i64) -> Order {
        Order {
            id: OrderId::new(id),
            user: None,
            order_items: Vec::new(),
            shipping_address: None,
            payment_method: String::new(),
            total_price: Money::from_major(total, Currency::INR),
            is_paid: true,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            created_at: Some(now() - Duration::hours(hours_ago)),
        }
    }

    fn user(id: &str, hours_ago: i64) -> User {
        let mut u = User::new(id, format!("User {}", id), format!("{}@example.com", id));
        u.created_at = Some(now() - Duration::hours(hours_ago));
        u
    }

    #[test]
    fn test_stats_split_monthly_revenue() {
        let orders = vec![order("o1", 5, 1000), order("o2", 24 * 40, 4000)];
        let stats = DashboardStats::compute(&orders, &[user("a", 1)], 12, now()).unwrap();
        assert_eq!(stats.total_revenue, Money::from_major(5000, Currency::INR));
        assert_eq!(stats.monthly_revenue, Money::from_major(1000, Currency::INR));
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_users, 1);
    }

    #[test]
    fn test_undated_orders_count_toward_totals_only() {
        let mut undated = order("o3", 0, 700);
        undated.created_at = None;
        let orders = vec![order("o1", 5, 1000), undated];
        let stats = DashboardStats::compute(&orders, &[], 0, now()).unwrap();
        assert_eq!(stats.total_revenue, Money::from_major(1700, Currency::INR));
        assert_eq!(stats.monthly_revenue, Money::from_major(1000, Currency::INR));

        let feed = recent_activity(&orders, &[], now());
        assert_eq!(feed[0].time, now());
        assert_eq!(feed[0].details, "Order #o3 - ₹700");
    }

    #[test]
    fn test_feed_is_newest_first_and_capped() {
        let orders = vec![order("order-0001", 10, 100), order("order-0002", 1, 200), order("order-0003", 30, 300)];
        let users = vec![user("u1", 5), user("u2", 2), user("u3", 50)];
        let feed = recent_activity(&orders, &users, now());

        assert_eq!(feed.len(), ACTIVITY_LIMIT);
        let kinds: Vec<_> = feed.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::Order, ActivityKind::User, ActivityKind::User, ActivityKind::Order]
        );
        assert_eq!(feed[0].details, "Order #r-0002 - ₹200");
        assert!(feed.windows(2).all(|w| w[0].time >= w[1].time));
    }

    #[test]
    fn test_summary_from_stats_endpoint() {
        let raw = serde_json::json!({
            "totalUsers": 3,
            "totalProducts": 120,
            "totalOrders": 7,
            "totalRevenue": 15499.5,
            "monthlyRevenue": 2999,
            "recentOrders": [
                {"_id": "665f00aa11bb22cc33dd44ee", "totalPrice": 2999, "createdAt": "2026-06-30T09:00:00Z"}
            ],
            "recentUsers": [
                {"_id": "u1", "name": "Asha", "email": "asha@example.com", "createdAt": "2026-06-30T11:00:00Z"}
            ]
        });
        let summary: DashboardSummary = serde_json::from_value(raw).unwrap();
        let (stats, feed) = summary.into_dashboard(now());

        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_products, 120);
        assert_eq!(stats.total_revenue, Money::new(1_549_950, Currency::INR));
        assert_eq!(stats.monthly_revenue, Money::from_major(2999, Currency::INR));
        let kinds: Vec<_> = feed.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ActivityKind::User, ActivityKind::Order]);
        assert_eq!(feed[1].details, "Order #dd44ee - ₹2,999");
    }

    #[test]
    fn test_summary_tolerates_missing_lists() {
        let summary: DashboardSummary = serde_json::from_str(r#"{"totalOrders": 2}"#).unwrap();
        let (stats, feed) = summary.into_dashboard(now());
        assert_eq!(stats.total_orders, 2);
        assert!(stats.total_revenue.is_zero());
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, ActivityKind::Info);
    }

    #[test]
    fn test_empty_feed_gets_welcome_entry() {
        let feed = recent_activity(&[], &[], now());
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].kind, ActivityKind::Info);
        assert_eq!(feed[0].message, "Welcome to the dashboard");
    }
}
