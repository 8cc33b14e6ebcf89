//! Resolve a storefront path: which screen it is, what it would fetch and
//! whether the current session may open it.

use anyhow::Result;
use serde_json::json;
use storefront_commerce::search::{CatalogQuery, FilterState};
use storefront_state::{Access, Route};

use super::RouteArgs;
use crate::context::Context;

/// Run the route command.
pub async fn run(args: RouteArgs, ctx: &Context) -> Result<()> {
    let route = Route::parse(&args.path);

    let signed_in = match ctx.resume_session().await {
        Ok(signed_in) => signed_in,
        Err(e) => {
            ctx.output.debug(&format!("{:#}", e));
            false
        }
    };
    let is_admin = ctx.storefront.with_state(|s| s.user.is_admin());
    let access = route.access(signed_in, is_admin);
    let query = listing_query(&route, ctx.config.catalog.homepage_page_size);

    if ctx.output.is_json() {
        let redirect = match &access {
            Access::Allowed => None,
            Access::Redirect(to) => Some(to.as_str()),
        };
        ctx.output.json(&json!({
            "route": route,
            "path": route.path(),
            "title": route.title(),
            "query": query.as_ref().map(|q| q.to_query_pairs()),
            "redirect": redirect,
        }));
        return Ok(());
    }

    ctx.output.header(&route.title());
    ctx.output.kv("path", &route.path());
    if let Route::Admin(admin) = &route {
        ctx.output.kv("section", admin.nav_section().nav_label());
    }
    if let Some(query) = &query {
        let pairs: Vec<String> = query
            .to_query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        ctx.output.kv("fetches", &format!("/api/products?{}", pairs.join("&")));
    }
    match access {
        Access::Allowed => ctx.output.kv("access", "allowed"),
        Access::Redirect(to) => ctx.output.kv("access", &format!("redirect to {}", to)),
    }
    Ok(())
}

/// The product query a catalog screen issues with no filters applied.
fn listing_query(route: &Route, homepage_page_size: u32) -> Option<CatalogQuery> {
    route
        .catalog_params()
        .map(|params| CatalogQuery::build_with(&FilterState::default(), &params, homepage_page_size))
}
