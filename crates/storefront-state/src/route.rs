//! Screen routing: a closed set of storefront and admin screens parsed from a path.

use serde::Serialize;
use std::fmt;
use storefront_commerce::search::RouteParams;

/// Storefront screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "kebab-case")]
pub enum Route {
    Home,
    Search { keyword: String, page: Option<u32> },
    Category { category: String, page: Option<u32> },
    Page { n: u32 },
    Product { id: String },
    Cart,
    Login,
    Register,
    Profile,
    Orders,
    Shipping,
    Payment,
    PlaceOrder,
    Checkout,
    Order { id: String },
    About,
    Contact,
    Admin(AdminRoute),
    NotFound,
}

/// Admin console screens, all under `/admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "admin", rename_all = "kebab-case")]
pub enum AdminRoute {
    Dashboard,
    Users,
    UserAdd,
    UserEdit { id: String },
    Products,
    ProductAdd,
    ProductEdit { id: String },
    Orders,
    OrderView { id: String },
    OrderEdit { id: String },
    Analytics,
    Settings,
}

/// Outcome of checking a route against the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Redirect(String),
}

fn page_number(s: &str) -> Option<u32> {
    s.parse().ok()
}

fn with_page(params: RouteParams, page: Option<u32>) -> RouteParams {
    match page {
        Some(n) => params.with_page(n),
        None => params,
    }
}

impl Route {
    /// Parse a path. Query string and trailing slash are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["search", kw] => Route::Search {
                keyword: kw.to_string(),
                page: None,
            },
            ["search", kw, "page", n] => match page_number(n) {
                Some(n) => Route::Search {
                    keyword: kw.to_string(),
                    page: Some(n),
                },
                None => Route::NotFound,
            },
            ["category", c] => Route::Category {
                category: c.to_string(),
                page: None,
            },
            ["category", c, "page", n] => match page_number(n) {
                Some(n) => Route::Category {
                    category: c.to_string(),
                    page: Some(n),
                },
                None => Route::NotFound,
            },
            ["page", n] => page_number(n).map_or(Route::NotFound, |n| Route::Page { n }),
            ["product", id] => Route::Product { id: id.to_string() },
            ["cart"] | ["cart", _] => Route::Cart,
            ["login"] | ["mobile-login"] => Route::Login,
            ["register"] => Route::Register,
            ["profile"] => Route::Profile,
            ["orders"] => Route::Orders,
            ["shipping"] => Route::Shipping,
            ["payment"] => Route::Payment,
            ["placeorder"] => Route::PlaceOrder,
            ["checkout"] => Route::Checkout,
            ["order", id] => Route::Order { id: id.to_string() },
            ["about"] => Route::About,
            ["contact"] => Route::Contact,
            ["admin", rest @ ..] => AdminRoute::parse(rest).map_or(Route::NotFound, Route::Admin),
            _ => Route::NotFound,
        }
    }

    /// Canonical path for this screen.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Search { keyword, page: None } => format!("/search/{}", keyword),
            Route::Search {
                keyword,
                page: Some(n),
            } => format!("/search/{}/page/{}", keyword, n),
            Route::Category { category, page: None } => format!("/category/{}", category),
            Route::Category {
                category,
                page: Some(n),
            } => format!("/category/{}/page/{}", category, n),
            Route::Page { n } => format!("/page/{}", n),
            Route::Product { id } => format!("/product/{}", id),
            Route::Cart => "/cart".into(),
            Route::Login => "/login".into(),
            Route::Register => "/register".into(),
            Route::Profile => "/profile".into(),
            Route::Orders => "/orders".into(),
            Route::Shipping => "/shipping".into(),
            Route::Payment => "/payment".into(),
            Route::PlaceOrder => "/placeorder".into(),
            Route::Checkout => "/checkout".into(),
            Route::Order { id } => format!("/order/{}", id),
            Route::About => "/about".into(),
            Route::Contact => "/contact".into(),
            Route::Admin(admin) => admin.path(),
            Route::NotFound => "/404".into(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Route::Home | Route::Page { .. } => "Home".into(),
            Route::Search { keyword, .. } => format!("Search: {}", keyword),
            Route::Category { category, .. } => storefront_commerce::catalog::Category::new(category.as_str())
                .display_name()
                .to_string(),
            Route::Product { .. } => "Product".into(),
            Route::Cart => "Shopping Cart".into(),
            Route::Login => "Sign In".into(),
            Route::Register => "Register".into(),
            Route::Profile => "Profile".into(),
            Route::Orders => "My Orders".into(),
            Route::Shipping => "Shipping".into(),
            Route::Payment => "Payment".into(),
            Route::PlaceOrder => "Place Order".into(),
            Route::Checkout => "Checkout".into(),
            Route::Order { .. } => "Order Details".into(),
            Route::About => "About".into(),
            Route::Contact => "Contact".into(),
            Route::Admin(admin) => admin.title().into(),
            Route::NotFound => "Page Not Found".into(),
        }
    }

    /// Listing parameters for the catalog screens; `None` elsewhere.
    pub fn catalog_params(&self) -> Option<RouteParams> {
        match self {
            Route::Home => Some(RouteParams::home()),
            Route::Page { n } => Some(RouteParams::home().with_page(*n)),
            Route::Search { keyword, page } => Some(with_page(RouteParams::search(keyword.as_str()), *page)),
            Route::Category { category, page } => Some(with_page(RouteParams::category(category.as_str()), *page)),
            _ => None,
        }
    }

    /// Screens that need a signed-in session.
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Route::Profile
                | Route::Orders
                | Route::Shipping
                | Route::Payment
                | Route::PlaceOrder
                | Route::Checkout
                | Route::Order { .. }
        ) || self.requires_admin()
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Admin(_))
    }

    /// Guard the route. Anonymous visitors go to sign-in with a redirect back;
    /// signed-in non-admins are sent home from admin screens.
    pub fn access(&self, signed_in: bool, is_admin: bool) -> Access {
        if self.requires_session() && !signed_in {
            return Access::Redirect(format!("/login?redirect={}", self.path()));
        }
        if self.requires_admin() && !is_admin {
            return Access::Redirect("/".into());
        }
        Access::Allowed
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl AdminRoute {
    /// Sidebar entries, in display order.
    pub const NAV: [AdminRoute; 6] = [
        AdminRoute::Dashboard,
        AdminRoute::Products,
        AdminRoute::Users,
        AdminRoute::Orders,
        AdminRoute::Analytics,
        AdminRoute::Settings,
    ];

    /// Parse the segments after `/admin`. The bare root is the dashboard.
    pub fn parse(segments: &[&str]) -> Option<Self> {
        Some(match segments {
            [] | ["dashboard"] => AdminRoute::Dashboard,
            ["userlist"] | ["users"] => AdminRoute::Users,
            ["user", "add"] => AdminRoute::UserAdd,
            ["user", id, "edit"] => AdminRoute::UserEdit { id: id.to_string() },
            ["productlist"] | ["products"] => AdminRoute::Products,
            ["product", "add"] => AdminRoute::ProductAdd,
            ["product", id, "edit"] => AdminRoute::ProductEdit { id: id.to_string() },
            ["orderlist"] | ["orders"] => AdminRoute::Orders,
            ["order", id] | ["order", id, "view"] => AdminRoute::OrderView { id: id.to_string() },
            ["order", id, "edit"] => AdminRoute::OrderEdit { id: id.to_string() },
            ["analytics"] => AdminRoute::Analytics,
            ["settings"] => AdminRoute::Settings,
            _ => return None,
        })
    }

    pub fn path(&self) -> String {
        match self {
            AdminRoute::Dashboard => "/admin/dashboard".into(),
            AdminRoute::Users => "/admin/userlist".into(),
            AdminRoute::UserAdd => "/admin/user/add".into(),
            AdminRoute::UserEdit { id } => format!("/admin/user/{}/edit", id),
            AdminRoute::Products => "/admin/productlist".into(),
            AdminRoute::ProductAdd => "/admin/product/add".into(),
            AdminRoute::ProductEdit { id } => format!("/admin/product/{}/edit", id),
            AdminRoute::Orders => "/admin/orderlist".into(),
            AdminRoute::OrderView { id } => format!("/admin/order/{}/view", id),
            AdminRoute::OrderEdit { id } => format!("/admin/order/{}/edit", id),
            AdminRoute::Analytics => "/admin/analytics".into(),
            AdminRoute::Settings => "/admin/settings".into(),
        }
    }

    /// Page header title.
    pub fn title(&self) -> &'static str {
        match self {
            AdminRoute::Dashboard => "Admin Dashboard",
            AdminRoute::Users => "Users",
            AdminRoute::UserAdd => "Add User",
            AdminRoute::UserEdit { .. } => "Edit User",
            AdminRoute::Products => "Products",
            AdminRoute::ProductAdd => "Add Product",
            AdminRoute::ProductEdit { .. } => "Edit Product",
            AdminRoute::Orders => "Orders",
            AdminRoute::OrderView { .. } => "View Order",
            AdminRoute::OrderEdit { .. } => "Edit Order",
            AdminRoute::Analytics => "Analytics",
            AdminRoute::Settings => "Settings",
        }
    }

    /// Sidebar label.
    pub fn nav_label(&self) -> &'static str {
        match self {
            AdminRoute::Dashboard => "Dashboard",
            other => other.title(),
        }
    }

    /// The sidebar entry highlighted for this screen.
    pub fn nav_section(&self) -> AdminRoute {
        match self {
            AdminRoute::UserAdd | AdminRoute::UserEdit { .. } => AdminRoute::Users,
            AdminRoute::ProductAdd | AdminRoute::ProductEdit { .. } => AdminRoute::Products,
            AdminRoute::OrderView { .. } | AdminRoute::OrderEdit { .. } => AdminRoute::Orders,
            other => other.clone(),
        }
    }
}
