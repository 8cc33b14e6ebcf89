//! Storefront CLI - terminal client for the storefront API.
//!
//! Commands:
//! - `storefront home` - Featured products and category carousels
//! - `storefront browse` - Search, category listings and filters
//! - `storefront product` - Product detail with related products
//! - `storefront cart` - Manage the local cart
//! - `storefront login` / `register` / `logout` - Session
//! - `storefront avatar` - Upload a profile picture
//! - `storefront orders` - Your orders
//! - `storefront admin` - Dashboard, analytics and management lists
//! - `storefront route` - Resolve a storefront path
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::{
    AdminArgs, AvatarArgs, BrowseArgs, CartArgs, ConfigArgs, LoginArgs, ProductArgs, RegisterArgs, RouteArgs,
};

/// Storefront CLI - Browse the catalog, manage your cart and run the admin console
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the homepage
    Home,

    /// Browse or search the catalog
    Browse(BrowseArgs),

    /// Show a product
    Product(ProductArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Sign in
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Sign out and empty the cart
    Logout,

    /// Upload a profile picture
    Avatar(AvatarArgs),

    /// List your orders
    Orders,

    /// Admin console
    Admin(AdminArgs),

    /// Resolve a storefront path to its screen
    Route(RouteArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output) {
        Ok(ctx) => ctx,
        Err(e) => {
            output::Output::new(cli.verbose, cli.json).error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(&ctx.config.log.filter, cli.verbose);

    let result = match cli.command {
        Commands::Home => commands::catalog::home(&ctx).await,
        Commands::Browse(args) => commands::catalog::browse(args, &ctx).await,
        Commands::Product(args) => commands::catalog::product(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Login(args) => commands::account::login(args, &ctx).await,
        Commands::Register(args) => commands::account::register(args, &ctx).await,
        Commands::Logout => commands::account::logout(&ctx).await,
        Commands::Avatar(args) => commands::account::avatar(args, &ctx).await,
        Commands::Orders => commands::account::orders(&ctx).await,
        Commands::Admin(args) => commands::admin::run(args, &ctx).await,
        Commands::Route(args) => commands::route::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the configured filter, or `debug` with `--verbose`.
/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing(configured: &str, verbose: bool) {
    let fallback = if verbose { "debug" } else { configured };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
