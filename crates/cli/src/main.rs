//! FerreterIA CLI - store management and reporting tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the data directory with a demo catalog
//! ferre-cli seed
//!
//! # Show catalog statistics
//! ferre-cli stats
//!
//! # List or search products
//! ferre-cli products list
//! ferre-cli products search -f name -q martillo
//!
//! # List recorded orders
//! ferre-cli orders list
//! ```
//!
//! The data directory defaults to `./data` and can be moved with
//! `FERRETERIA_DATA_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ferre-cli")]
#[command(author, version, about = "FerreterIA store tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the store with a demo catalog
    Seed {
        /// Replace existing products instead of refusing to overwrite
        #[arg(long)]
        force: bool,
    },
    /// Show catalog statistics
    Stats,
    /// Inspect the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect recorded orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List every product
    List,
    /// Search products by a single field
    Search {
        /// Field to match on (`name`, `category`, `id`)
        #[arg(short, long, default_value = "name")]
        field: String,

        /// Case-insensitive substring to look for
        #[arg(short, long)]
        query: String,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List every recorded order
    List,
}

fn main() {
    // Load .env before the subscriber so RUST_LOG set there is honored
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { force } => commands::seed::run(force)?,
        Commands::Stats => commands::stats::run()?,
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list()?,
            ProductsAction::Search { field, query } => {
                commands::products::search(&field, &query)?;
            }
        },
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list()?,
        },
    }
    Ok(())
}
