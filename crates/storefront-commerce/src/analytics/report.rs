//! Windowed sales analytics over already-fetched orders and users.

use crate::account::User;
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use crate::orders::Order;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of best sellers reported.
pub const TOP_PRODUCTS: usize = 5;

/// Reporting window ending now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum AnalyticsWindow {
    Week,
    #[default]
    Month,
    Quarter,
}

impl AnalyticsWindow {
    pub const ALL: [AnalyticsWindow; 3] = [AnalyticsWindow::Week, AnalyticsWindow::Month, AnalyticsWindow::Quarter];

    pub fn days(&self) -> i64 {
        match self {
            AnalyticsWindow::Week => 7,
            AnalyticsWindow::Month => 30,
            AnalyticsWindow::Quarter => 90,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        match days {
            7 => Some(AnalyticsWindow::Week),
            30 => Some(AnalyticsWindow::Month),
            90 => Some(AnalyticsWindow::Quarter),
            _ => None,
        }
    }

    /// Earliest instant inside the window.
    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(self.days())
    }

    pub fn contains(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        at >= self.start(now)
    }
}

/// Order counts per derived status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusDistribution {
    /// Not paid.
    pub pending: usize,
    /// Paid, not delivered.
    pub paid: usize,
    pub delivered: usize,
}

impl StatusDistribution {
    pub fn total(&self) -> usize {
        self.pending + self.paid + self.delivered
    }
}

/// Quantity sold per product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub name: String,
    pub qty: i64,
}

/// Figures for the analytics screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub window: AnalyticsWindow,
    pub total_revenue: Money,
    pub total_orders: usize,
    pub new_users: usize,
    pub total_products: u64,
    pub average_order_value: Money,
    /// Orders per new user, as a percentage.
    pub conversion_rate: f64,
    pub daily_sales: BTreeMap<NaiveDate, Money>,
    pub top_products: Vec<ProductSales>,
    pub status_distribution: StatusDistribution,
}

impl AnalyticsReport {
    /// Aggregate in a single pass over each input.
    pub fn compute(
        orders: &[Order],
        users: &[User],
        total_products: u64,
        window: AnalyticsWindow,
        now: DateTime<Utc>,
    ) -> Result<Self, CommerceError> {
        let currency = Currency::default();
        let mut total_revenue = Money::zero(currency);
        let mut total_orders = 0;
        let mut daily_sales: BTreeMap<NaiveDate, Money> = BTreeMap::new();
        let mut sold: HashMap<&str, i64> = HashMap::new();
        let mut status_distribution = StatusDistribution::default();

        let in_window = orders
            .iter()
            .filter_map(|o| o.created_at.filter(|at| window.contains(*at, now)).map(|at| (o, at)));
        for (order, created_at) in in_window {
            total_orders += 1;
            total_revenue = total_revenue
                .try_add(&order.total_price)
                .ok_or(CommerceError::Overflow)?;

            let day = daily_sales
                .entry(created_at.date_naive())
                .or_insert_with(|| Money::zero(currency));
            *day = day.try_add(&order.total_price).ok_or(CommerceError::Overflow)?;

            for item in &order.order_items {
                *sold.entry(item.name.as_str()).or_insert(0) += item.qty;
            }

            if order.is_delivered {
                status_distribution.delivered += 1;
            } else if order.is_paid {
                status_distribution.paid += 1;
            }
            if !order.is_paid {
                status_distribution.pending += 1;
            }
        }

        let new_users = users
            .iter()
            .filter(|u| u.created_at.is_some_and(|at| window.contains(at, now)))
            .count();

        let mut top_products: Vec<ProductSales> = sold
            .into_iter()
            .map(|(name, qty)| ProductSales {
                name: name.to_string(),
                qty,
            })
            .collect();
        top_products.sort_by(|a, b| b.qty.cmp(&a.qty).then_with(|| a.name.cmp(&b.name)));
        top_products.truncate(TOP_PRODUCTS);

        let conversion_rate = if new_users > 0 {
            total_orders as f64 / new_users as f64 * 100.0
        } else {
            0.0
        };

        Ok(Self {
            window,
            average_order_value: total_revenue.average_over(total_orders),
            total_revenue,
            total_orders,
            new_users,
            total_products,
            conversion_rate,
            daily_sales,
            top_products,
            status_distribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{OrderId, ProductId};
    use crate::orders::OrderItem;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 30, 12, 0, 0).unwrap()
    }

    fn item(name: &str, qty: i64) -> OrderItem {
        OrderItem {
            name: name.into(),
            qty,
            image: String::new(),
            price: Money::from_major(100, Currency::INR),
            product: ProductId::new(name),
            size: None,
            color: None,
        }
    }

    fn order(id: &str, days_ago: i64, total: i64, paid: bool, delivered: bool, items: Vec<OrderItem>) -> Order {
        Order {
            id: OrderId::new(id),
            user: None,
            order_items: items,
            shipping_address: None,
            payment_method: String::new(),
            total_price: Money::from_major(total, Currency::INR),
            is_paid: paid,
            paid_at: None,
            is_delivered: delivered,
            delivered_at: None,
            created_at: Some(now() - Duration::days(days_ago)),
        }
    }

    fn user(id: &str, days_ago: Option<i64>) -> User {
        let mut u = User::new(id, id, format!("{}@example.com", id));
        u.created_at = days_ago.map(|d| now() - Duration::days(d));
        u
    }

    #[test]
    fn test_empty_inputs_give_zeroes() {
        let report = AnalyticsReport::compute(&[], &[], 0, AnalyticsWindow::Month, now()).unwrap();
        assert!(report.total_revenue.is_zero());
        assert!(report.average_order_value.is_zero());
        assert_eq!(report.conversion_rate, 0.0);
        assert!(report.daily_sales.is_empty());
        assert!(report.top_products.is_empty());
    }

    #[test]
    fn test_undated_orders_fall_outside_every_window() {
        let mut undated = order("o2", 0, 800, true, false, vec![item("Tee", 4)]);
        undated.created_at = None;
        let orders = vec![order("o1", 2, 1000, true, false, vec![item("Jeans", 1)]), undated];

        let quarter = AnalyticsReport::compute(&orders, &[], 0, AnalyticsWindow::Quarter, now()).unwrap();
        assert_eq!(quarter.total_orders, 1);
        assert_eq!(quarter.total_revenue, Money::from_major(1000, Currency::INR));
        assert_eq!(quarter.top_products.len(), 1);
        assert_eq!(quarter.top_products[0].name, "Jeans");
    }

    #[test]
    fn test_window_filters_orders_and_users() {
        let orders = vec![
            order("o1", 1, 1000, true, false, vec![item("Tee", 2)]),
            order("o2", 1, 500, false, false, vec![item("Jeans", 1)]),
            order("o3", 20, 3000, true, true, vec![item("Tee", 1)]),
            order("o4", 45, 9999, true, true, vec![item("Jacket", 9)]),
        ];
        let users = vec![user("a", Some(2)), user("b", Some(60)), user("c", None), user("d", Some(3))];

        let week = AnalyticsReport::compute(&orders, &users, 42, AnalyticsWindow::Week, now()).unwrap();
        assert_eq!(week.total_orders, 2);
        assert_eq!(week.total_revenue, Money::from_major(1500, Currency::INR));
        assert_eq!(week.average_order_value, Money::from_major(750, Currency::INR));
        assert_eq!(week.new_users, 2);
        assert_eq!(week.conversion_rate, 100.0);
        assert_eq!(week.total_products, 42);
        assert_eq!(week.daily_sales.len(), 1);

        let month = AnalyticsReport::compute(&orders, &users, 42, AnalyticsWindow::Month, now()).unwrap();
        assert_eq!(month.total_orders, 3);
        assert_eq!(
            month.status_distribution,
            StatusDistribution {
                pending: 1,
                paid: 1,
                delivered: 1
            }
        );
        assert_eq!(month.top_products[0], ProductSales { name: "Tee".into(), qty: 3 });
    }

    #[test]
    fn test_top_products_ties_by_name_and_limit() {
        let items = ["F", "E", "D", "C", "B", "A"].iter().map(|n| item(n, 2)).collect();
        let orders = vec![order("o1", 0, 100, true, false, items)];
        let report = AnalyticsReport::compute(&orders, &[], 0, AnalyticsWindow::Week, now()).unwrap();
        let names: Vec<_> = report.top_products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_daily_sales_group_by_calendar_day() {
        let orders = vec![
            order("o1", 0, 100, true, false, vec![]),
            order("o2", 0, 250, true, false, vec![]),
            order("o3", 2, 40, true, false, vec![]),
        ];
        let report = AnalyticsReport::compute(&orders, &[], 0, AnalyticsWindow::Week, now()).unwrap();
        let today = now().date_naive();
        assert_eq!(report.daily_sales[&today], Money::from_major(350, Currency::INR));
        assert_eq!(report.daily_sales.len(), 2);
    }

    #[test]
    fn test_window_from_days() {
        assert_eq!(AnalyticsWindow::from_days(90), Some(AnalyticsWindow::Quarter));
        assert_eq!(AnalyticsWindow::from_days(14), None);
    }
}
