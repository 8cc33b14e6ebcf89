//! Storefront browsing: homepage, listings and product detail.

use anyhow::{anyhow, Context as _, Result};
use console::style;
use serde_json::json;
use storefront_commerce::catalog::{Product, ProductSelection};
use storefront_commerce::ids::ProductId;
use storefront_commerce::search::{present, CatalogQuery, FilterState, GridView, HomeSections, Presentation, RouteParams, SortChoice};

use super::{BrowseArgs, ProductArgs};
use crate::context::Context;

/// Products shown per carousel in the terminal.
const CAROUSEL_PREVIEW: usize = 4;

/// Pager width.
const PAGER_WIDTH: usize = 7;

/// Run the home command.
pub async fn home(ctx: &Context) -> Result<()> {
    let route = RouteParams::home();
    show_listing(ctx, &FilterState::default(), &route).await
}

/// Run the browse command.
pub async fn browse(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let (filters, route) = listing_request(&args)?;
    show_listing(ctx, &filters, &route).await
}

/// Route and filters for the browse flags. A keyword makes it a search route
/// and the category becomes a filter; otherwise the category is the route.
fn listing_request(args: &BrowseArgs) -> Result<(FilterState, RouteParams)> {
    let mut filters = FilterState {
        brand: args.brand.clone().unwrap_or_default(),
        min_price: args.min_price.clone().unwrap_or_default(),
        max_price: args.max_price.clone().unwrap_or_default(),
        color: args.color.clone().unwrap_or_default(),
        size: args.size.clone().unwrap_or_default(),
        in_stock: args.in_stock,
        featured: args.featured,
        ..FilterState::default()
    };
    if let Some(sort) = &args.sort {
        let choice = SortChoice::parse(sort).ok_or_else(|| {
            let options: Vec<String> = SortChoice::ALL.iter().map(SortChoice::value).collect();
            anyhow!("Unknown sort '{}'; expected one of {}", sort, options.join(", "))
        })?;
        filters.apply_sort(choice);
    }

    let route = match (&args.search, &args.category) {
        (Some(keyword), category) => {
            filters.category = category.clone().unwrap_or_default();
            RouteParams::search(keyword.as_str())
        }
        (None, Some(category)) => RouteParams::category(category.as_str()),
        (None, None) => RouteParams::home(),
    };
    let route = match args.page {
        Some(page) => route.with_page(page),
        None => route,
    };
    Ok((filters, route))
}

async fn show_listing(ctx: &Context, filters: &FilterState, route: &RouteParams) -> Result<()> {
    if ctx.output.is_verbose() {
        let homepage_page_size = ctx.storefront.config().homepage_page_size;
        ctx.output
            .debug(&format!("GET /api/products?{}", query_string(filters, route, homepage_page_size)));
    }

    let spinner = ctx.output.spinner("Loading products...");
    let result = ctx.storefront.browse(filters, route).await;
    spinner.finish_and_clear();
    let page = result.context("Failed to load products")?;

    match present(&page, route) {
        Presentation::Home(sections) => print_home(ctx, &sections),
        Presentation::Grid(grid) => print_grid(ctx, &grid),
    }
    Ok(())
}

/// Wire query for a listing, as the gateway will send it.
fn query_string(filters: &FilterState, route: &RouteParams, homepage_page_size: u32) -> String {
    let query = CatalogQuery::build_with(filters, route, homepage_page_size);
    query
        .to_query_pairs()
        .into_iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

fn print_home(ctx: &Context, sections: &HomeSections<'_>) {
    if ctx.output.is_json() {
        let carousels: Vec<_> = sections
            .carousels
            .iter()
            .map(|b| {
                json!({
                    "title": b.spec.title,
                    "link": b.spec.link(),
                    "products": b.products,
                })
            })
            .collect();
        ctx.output.json(&json!({ "featured": sections.featured, "carousels": carousels }));
        return;
    }

    if sections.is_empty() {
        ctx.output.info("No products available.");
        return;
    }

    if !sections.featured.is_empty() {
        ctx.output.header("FEATURED");
        for product in &sections.featured {
            ctx.output.product_line(product);
        }
    }

    for bucket in &sections.carousels {
        ctx.output.header(bucket.spec.title);
        for product in bucket.products.iter().take(CAROUSEL_PREVIEW) {
            ctx.output.product_line(product);
        }
        let more = bucket.products.len().saturating_sub(CAROUSEL_PREVIEW);
        if more > 0 {
            ctx.output
                .kv("more", &format!("{} more at {}", more, bucket.spec.link()));
        }
    }
}

fn print_grid(ctx: &Context, grid: &GridView<'_>) {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "heading": grid.heading,
            "products": grid.products,
            "pagination": grid.pagination,
        }));
        return;
    }

    ctx.output.header(&grid.heading);
    if grid.products.is_empty() {
        ctx.output.info("No products found.");
        return;
    }
    for product in &grid.products {
        ctx.output.product_line(product);
    }

    let p = grid.pagination;
    ctx.output.info(&format!("Page {} of {} ({} products)", p.page, p.pages, p.total));
    let pager: Vec<String> = grid
        .pager(PAGER_WIDTH)
        .into_iter()
        .map(|(n, _, current)| {
            if current {
                style(format!("[{}]", n)).bold().to_string()
            } else {
                n.to_string()
            }
        })
        .collect();
    if !pager.is_empty() {
        ctx.output.kv("pages", &pager.join(" "));
    }
    if p.has_next() {
        ctx.output.kv("next", &grid.page_link(p.page + 1));
    }
}

/// Run the product command.
pub async fn product(args: ProductArgs, ctx: &Context) -> Result<()> {
    let id = ProductId::new(args.id);
    let spinner = ctx.output.spinner("Loading product...");
    let result = ctx.storefront.fetch_product(&id).await;
    spinner.finish_and_clear();
    let product = result.with_context(|| format!("Failed to load product {}", id))?;
    let related = ctx.storefront.with_state(|s| s.product.related.clone());

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "product": product, "related": related }));
        return Ok(());
    }

    print_product(ctx, &product);

    if !related.is_empty() {
        ctx.output.header("YOU MAY ALSO LIKE");
        for p in related.iter().filter(|p| p.is_renderable()) {
            ctx.output.product_line(p);
        }
    }
    Ok(())
}

fn print_product(ctx: &Context, product: &Product) {
    ctx.output.header(&product.name);
    ctx.output.product_line(product);
    if !product.brand.is_empty() {
        ctx.output.kv("brand", &product.brand);
    }
    ctx.output.kv("category", product.category.display_name());
    if product.num_reviews > 0 {
        ctx.output
            .kv("rating", &format!("{:.1} ({} reviews)", product.rating, product.num_reviews));
    }

    // Sizes per color, as the detail screen offers them.
    let colors: Vec<Option<&str>> = if product.colors.is_empty() {
        vec![None]
    } else {
        product.colors.iter().map(|c| Some(c.as_str())).collect()
    };
    for color in colors {
        let mut selection = ProductSelection::for_product(product);
        if let Some(c) = color {
            selection.select_color(c);
        }
        let sizes: Vec<String> = selection
            .available_sizes(product)
            .iter()
            .map(|s| format!("{} ({})", s.size, s.stock))
            .collect();
        let label = color.unwrap_or("sizes");
        let value = if sizes.is_empty() {
            style("out of stock").dim().to_string()
        } else {
            sizes.join(", ")
        };
        ctx.output.kv(label, &value);
    }

    if !product.description.is_empty() {
        ctx.output.info(&product.description);
    }
}
