//! Shopfront CLI - Drive the storefront screens from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse and search the catalogue
//! shopfront products
//! shopfront search lámpara
//! shopfront product 2f8c0e4e-5a4f-4a53-9a59-0b8f2d4f6a11
//!
//! # Signed-in commands
//! shopfront -e ana@example.com -p secret cart
//! shopfront -e ana@example.com add-to-cart 7 2   # password from SHOPFRONT_PASSWORD
//! shopfront -e ana@example.com my-products
//!
//! # Keep the catalogue on screen, refreshing silently, until Ctrl-C
//! shopfront watch
//! ```
//!
//! # Commands
//!
//! - `products` - List every product
//! - `search` - Search products by text
//! - `product` - Show one product with related products
//! - `cart` - Show the signed-in user's cart
//! - `add-to-cart` - Add a product to the cart
//! - `my-products` - List the signed-in seller's products
//! - `plans` - Show the subscription plans
//! - `watch` - Auto-refreshing product list

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopfront_app::{AppState, SyncConfig};
use shopfront_client::ClientConfig;
use shopfront_core::ProductId;
use uuid::Uuid;

mod commands;

const DEFAULT_LOG_FILTER: &str = "shopfront=info,shopfront_app=info,shopfront_client=info";

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront client")]
struct Cli {
    /// Sign in with this email before running the command
    #[arg(short, long, global = true)]
    email: Option<String>,

    /// Password for `--email` (falls back to `SHOPFRONT_PASSWORD`)
    #[arg(short, long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product
    Products,
    /// Search products by text
    Search {
        /// Text to search for
        query: String,
    },
    /// Show one product and its related products
    Product {
        /// Product UUID
        uuid: Uuid,
    },
    /// Show the cart
    Cart,
    /// Add a product to the cart
    AddToCart {
        /// Numeric product id
        product_id: ProductId,

        /// Units to add
        #[arg(default_value_t = 1)]
        quantity: i32,
    },
    /// List your own products
    MyProducts,
    /// Show the subscription plans
    Plans,
    /// Keep the product list on screen until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Plans = cli.command {
        commands::plans::show();
        return Ok(());
    }

    let app = AppState::new(&ClientConfig::from_env()?, SyncConfig::from_env()?)?;

    if let Some(email) = cli.email.as_deref() {
        let password = commands::password(cli.password)?;
        commands::sign_in(&app, email, &password).await?;
    }

    match cli.command {
        Commands::Products => commands::catalogue::list(&app).await?,
        Commands::Search { query } => commands::catalogue::search(&app, &query).await?,
        Commands::Product { uuid } => commands::catalogue::show(&app, uuid).await?,
        Commands::Cart => commands::cart::show(&app).await?,
        Commands::AddToCart {
            product_id,
            quantity,
        } => commands::cart::add(&app, product_id, quantity).await?,
        Commands::MyProducts => commands::seller::my_products(&app).await?,
        Commands::Watch => commands::catalogue::watch(&app).await?,
        Commands::Plans => {}
    }
    Ok(())
}
