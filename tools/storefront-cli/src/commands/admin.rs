//! Admin console: dashboard, analytics and the management lists.

use std::time::Duration;

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::Utc;
use dialoguer::Confirm;
use serde_json::json;
use storefront_commerce::account::{Role, UserFilter};
use storefront_commerce::analytics::{ActivityKind, AnalyticsWindow};
use storefront_commerce::catalog::Department;
use storefront_commerce::ids::{ProductId, UserId};
use storefront_commerce::orders::{OrderFilter, StatusFilter};
use storefront_commerce::search::AdminProductQuery;
use storefront_state::Debouncer;

use super::{AdminArgs, AdminCommand};
use crate::context::Context;
use crate::output::status_badge;

/// Run the admin command. Every subcommand needs an admin session.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    if !ctx.resume_session().await? {
        bail!("Please sign in to continue");
    }
    if !ctx.storefront.with_state(|s| s.user.is_admin()) {
        bail!("Admin access required");
    }

    match args.command {
        AdminCommand::Dashboard => dashboard(ctx).await,
        AdminCommand::Analytics { days } => analytics(ctx, days).await,
        AdminCommand::Orders { search, status } => orders(ctx, search, status).await,
        AdminCommand::Users { search, role } => users(ctx, search, role).await,
        AdminCommand::Products {
            search,
            department,
            category,
            page,
        } => products(ctx, search, department, category, page).await,
        AdminCommand::DeleteProduct { id, yes } => delete_product(ctx, id, yes).await,
        AdminCommand::DeleteUser { id, yes } => delete_user(ctx, id, yes).await,
    }
}

async fn dashboard(ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Loading dashboard...");
    let result = ctx.storefront.dashboard(Utc::now()).await;
    spinner.finish_and_clear();
    let (stats, activity) = result.context("Failed to load dashboard")?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "stats": stats, "activity": activity }));
        return Ok(());
    }

    ctx.output.header("ADMIN DASHBOARD");
    ctx.output.kv("users", &stats.total_users.to_string());
    ctx.output.kv("products", &stats.total_products.to_string());
    ctx.output.kv("orders", &stats.total_orders.to_string());
    ctx.output.kv("revenue", &stats.total_revenue.display());
    ctx.output.kv("last 30 days", &stats.monthly_revenue.display());

    ctx.output.header("RECENT ACTIVITY");
    for entry in &activity {
        let icon = match entry.kind {
            ActivityKind::Order => "order",
            ActivityKind::User => "user",
            ActivityKind::Info => "info",
        };
        ctx.output.list_item(&format!(
            "[{}] {}: {} ({})",
            icon,
            entry.message,
            entry.details,
            entry.time.format("%Y-%m-%d %H:%M")
        ));
    }
    Ok(())
}

async fn analytics(ctx: &Context, days: u32) -> Result<()> {
    let window = AnalyticsWindow::from_days(days).ok_or_else(|| anyhow!("--days must be 7, 30 or 90"))?;

    let spinner = ctx.output.spinner("Crunching numbers...");
    let result = ctx.storefront.analytics(window, Utc::now()).await;
    spinner.finish_and_clear();
    let report = result.context("Failed to load analytics")?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("ANALYTICS (last {} days)", window.days()));
    ctx.output.kv("revenue", &report.total_revenue.display());
    ctx.output.kv("orders", &report.total_orders.to_string());
    ctx.output.kv("new users", &report.new_users.to_string());
    ctx.output.kv("products", &report.total_products.to_string());
    ctx.output.kv("avg order", &report.average_order_value.display());
    ctx.output.kv("conversion", &format!("{:.1}%", report.conversion_rate));

    let dist = report.status_distribution;
    ctx.output.kv(
        "status",
        &format!("{} pending, {} processing, {} delivered", dist.pending, dist.paid, dist.delivered),
    );

    if !report.daily_sales.is_empty() {
        ctx.output.header("DAILY SALES");
        for (day, total) in &report.daily_sales {
            ctx.output.kv(&day.format("%Y-%m-%d").to_string(), &total.display());
        }
    }

    if !report.top_products.is_empty() {
        ctx.output.header("TOP PRODUCTS");
        for (rank, p) in report.top_products.iter().enumerate() {
            ctx.output.list_item(&format!("{}. {} ({} sold)", rank + 1, p.name, p.qty));
        }
    }
    Ok(())
}

async fn orders(ctx: &Context, search: Option<String>, status: Option<String>) -> Result<()> {
    let status = status
        .map(|s| StatusFilter::parse(&s).ok_or_else(|| anyhow!("Unknown status '{}'", s)))
        .transpose()?;
    let filter = OrderFilter {
        search: search.unwrap_or_default(),
        status,
    };

    let spinner = ctx.output.spinner("Loading orders...");
    let result = ctx.storefront.fetch_orders().await;
    spinner.finish_and_clear();
    let all = result.context("Failed to load orders")?;
    let shown = filter.apply(&all);

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header(&format!("ORDERS ({} of {})", shown.len(), all.len()));
    let widths = [10, 20, 26, 12, 12];
    ctx.output.table_row(&["ORDER", "CUSTOMER", "EMAIL", "TOTAL", "STATUS"], &widths);
    for order in shown {
        ctx.output.table_row(
            &[
                &format!("#{}", order.reference()),
                order.customer_name(),
                order.customer_email(),
                &order.total_price.display(),
                &status_badge(order.status()),
            ],
            &widths,
        );
    }
    Ok(())
}

async fn users(ctx: &Context, search: Option<String>, role: Option<String>) -> Result<()> {
    let role = role
        .map(|r| r.parse::<Role>().map_err(|_| anyhow!("Unknown role '{}'", r)))
        .transpose()?;
    let filter = UserFilter {
        search: search.unwrap_or_default(),
        role,
    };

    let spinner = ctx.output.spinner("Loading users...");
    let result = ctx.storefront.fetch_users(&filter).await;
    spinner.finish_and_clear();
    let fetched = result.context("Failed to load users")?;
    // The server may ignore the query; filter locally as well.
    let shown = filter.apply(&fetched);

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header(&format!("USERS ({})", shown.len()));
    let widths = [26, 20, 28, 8];
    ctx.output.table_row(&["ID", "NAME", "EMAIL", "ROLE"], &widths);
    for user in shown {
        ctx.output
            .table_row(&[user.id.as_str(), &user.name, &user.email, user.role().badge()], &widths);
    }
    Ok(())
}

async fn products(
    ctx: &Context,
    search: Option<String>,
    department: Option<String>,
    category: Option<String>,
    page: u32,
) -> Result<()> {
    let mut query = AdminProductQuery {
        page_size: ctx.config.catalog.admin_page_size,
        ..AdminProductQuery::default()
    };
    if let Some(d) = department {
        let department = Department::from_str(&d).ok_or_else(|| anyhow!("Unknown department '{}'", d))?;
        query.set_department(Some(department));
    }
    if let Some(c) = category {
        if query.department.is_some() && !query.available_categories().contains(&c.as_str()) {
            bail!(
                "'{}' is not a {} category; choose from {}",
                c,
                query.department.map_or("", |d| d.as_str()),
                query.available_categories().join(", ")
            );
        }
        query.set_category(Some(c));
    }
    if let Some(term) = search {
        // Same quiet period the search box waits before querying.
        let debouncer = Debouncer::new(Duration::from_millis(ctx.config.catalog.debounce_ms));
        if let Some(term) = debouncer.settle(term).await {
            query.set_search(term);
        }
    }
    query.set_page(page);

    let spinner = ctx.output.spinner("Loading products...");
    let result = ctx.storefront.fetch_products(&query.to_catalog_query()).await;
    spinner.finish_and_clear();
    let page = result.context("Failed to load products")?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    let p = page.pagination();
    ctx.output.header(&format!("PRODUCTS (page {} of {}, {} total)", p.page, p.pages, p.total));
    let widths = [26, 28, 18, 10, 6];
    ctx.output.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    for product in &page.products {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                product.category.display_name(),
                &product.price.display(),
                &product.total_stock().to_string(),
            ],
            &widths,
        );
    }
    Ok(())
}

async fn delete_product(ctx: &Context, id: String, yes: bool) -> Result<()> {
    let id = ProductId::new(id);
    if !yes
        && !Confirm::new()
            .with_prompt(format!("Delete product {}? This cannot be undone", id))
            .default(false)
            .interact()?
    {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Deleting product...");
    let result = ctx.storefront.delete_product(&id).await;
    spinner.finish_and_clear();
    result.with_context(|| format!("Failed to delete product {}", id))?;
    ctx.output.success(&format!("Deleted product {}", id));
    Ok(())
}

async fn delete_user(ctx: &Context, id: String, yes: bool) -> Result<()> {
    let id = UserId::new(id);
    if ctx
        .storefront
        .with_state(|s| s.user.user_info.as_ref().is_some_and(|u| u.id == id))
    {
        bail!("You cannot delete your own account");
    }
    if !yes
        && !Confirm::new()
            .with_prompt(format!("Delete user {}?", id))
            .default(false)
            .interact()?
    {
        ctx.output.info("Cancelled");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Deleting user...");
    let result = ctx.storefront.delete_user(&id).await;
    spinner.finish_and_clear();
    result.with_context(|| format!("Failed to delete user {}", id))?;
    ctx.output.success(&format!("Deleted user {}", id));
    Ok(())
}
