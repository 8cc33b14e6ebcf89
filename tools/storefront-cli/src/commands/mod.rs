//! CLI command implementations.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod route;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Category slug (e.g. `jeans`).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Search keyword.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Page number.
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Brand filter.
    #[arg(long)]
    pub brand: Option<String>,

    /// Minimum price, passed through as typed.
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price, passed through as typed.
    #[arg(long)]
    pub max_price: Option<String>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub size: Option<String>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Only featured products.
    #[arg(long)]
    pub featured: bool,

    /// Sort: `createdAt-desc`, `rating-desc`, `price-asc` or `price-desc`.
    #[arg(long)]
    pub sort: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    List,
    /// Add a product in a size and color.
    Add {
        /// Product id.
        product: String,
        #[arg(short, long)]
        size: String,
        /// Defaults to the product's first color.
        #[arg(short, long)]
        color: Option<String>,
        #[arg(short, long, default_value = "1")]
        qty: i64,
    },
    /// Change the quantity of a line.
    Update {
        product: String,
        #[arg(short, long)]
        size: String,
        #[arg(short, long)]
        color: Option<String>,
        #[arg(short, long)]
        qty: i64,
    },
    /// Remove a line.
    Remove {
        product: String,
        #[arg(short, long)]
        size: String,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    pub email: String,

    /// Prompted for when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the avatar command.
#[derive(Args)]
pub struct AvatarArgs {
    /// Image file (JPEG, PNG, GIF or WebP, at most 5MB).
    pub path: std::path::PathBuf,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Totals and recent activity.
    Dashboard,
    /// Sales report over a window.
    Analytics {
        /// 7, 30 or 90.
        #[arg(short, long, default_value = "30")]
        days: u32,
    },
    /// All orders.
    Orders {
        /// Search order id, customer name or email.
        #[arg(short, long)]
        search: Option<String>,
        /// `pending`, `paid` or `delivered`.
        #[arg(long)]
        status: Option<String>,
    },
    /// All users.
    Users {
        #[arg(short, long)]
        search: Option<String>,
        /// `admin` or `regular`.
        #[arg(long)]
        role: Option<String>,
    },
    /// Product list, 12 per page.
    Products {
        #[arg(short, long)]
        search: Option<String>,
        /// MEN, LADIES, KIDS, SPORTS or OTHER.
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(short, long, default_value = "1")]
        page: u32,
    },
    /// Delete a product.
    DeleteProduct {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete a user.
    DeleteUser {
        id: String,
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the route command.
#[derive(Args)]
pub struct RouteArgs {
    /// Path such as `/category/jeans/page/2`.
    pub path: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default storefront.toml.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Set a value in the config file, e.g. `catalog.stale_policy latest-request-wins`.
    Set {
        /// Dotted key such as `api.base_url`.
        key: String,
        value: String,
    },
}
