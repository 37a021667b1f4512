//! RUPASARA CLI - browse the saree catalog, build a cart and place orders.
//!
//! Commands:
//! - `rupasara catalog` - List category groups and categories
//! - `rupasara category` - Show one category, optionally filtered by style
//! - `rupasara currency` - Show or set the display currency
//! - `rupasara rates` - Refresh and show exchange rates
//! - `rupasara shop` - Interactive shopping session with cart and checkout

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod session;
mod whatsapp;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CatalogArgs, CategoryArgs, CurrencyArgs, RatesArgs, ShopArgs};

/// RUPASARA storefront - handwoven sarees from the terminal
#[derive(Parser)]
#[command(name = "rupasara")]
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
    #[arg(short, long, global = true, env = "RUPASARA_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Catalog(CatalogArgs),

    /// Show a category
    Category(CategoryArgs),

    /// Show or set the display currency
    Currency(CurrencyArgs),

    /// Refresh and show exchange rates
    Rates(RatesArgs),

    /// Start an interactive shopping session
    Shop(ShopArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);
    let ctx = context::Context::load(cli.config.as_deref(), output)?;
    logging::init(&ctx.config.log, cli.verbose);
    tracing::debug!(cwd = %ctx.cwd.display(), "context loaded");

    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Category(args) => commands::catalog::run_category(args, &ctx).await,
        Commands::Currency(args) => commands::currency::run(args, &ctx).await,
        Commands::Rates(args) => commands::rates::run(args, &ctx).await,
        Commands::Shop(args) => commands::shop::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
