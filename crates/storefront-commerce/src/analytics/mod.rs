//! Admin analytics: the windowed report and the dashboard summary.

mod dashboard;
mod report;

pub use dashboard::{recent_activity, ActivityEntry, ActivityKind, DashboardStats, DashboardSummary, ACTIVITY_LIMIT};
pub use report::{AnalyticsReport, AnalyticsWindow, ProductSales, StatusDistribution, TOP_PRODUCTS};
