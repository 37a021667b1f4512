//! CLI command implementations.

pub mod catalog;
pub mod currency;
pub mod rates;
pub mod shop;

use clap::Args;
use rust_decimal::Decimal;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Also list every product.
    #[arg(short, long)]
    pub products: bool,
}

/// Arguments for the category command.
#[derive(Args)]
pub struct CategoryArgs {
    /// Category slug, e.g. `banarasi`.
    pub slug: String,

    /// Only show products with this style.
    #[arg(short, long)]
    pub style: Option<String>,

    /// Fetch live exchange rates before pricing.
    #[arg(long)]
    pub refresh: bool,
}

/// Arguments for the currency command.
#[derive(Args)]
pub struct CurrencyArgs {
    /// Currency to switch to (INR, EUR or USD). Omit to show the current one.
    #[arg(conflicts_with = "reset")]
    pub code: Option<String>,

    /// Forget the saved choice and go back to INR.
    #[arg(long)]
    pub reset: bool,
}

/// Arguments for the rates command.
#[derive(Args)]
pub struct RatesArgs {
    /// Base-currency amount to show converted.
    #[arg(short, long, default_value = "1000")]
    pub amount: Decimal,
}

/// Arguments for the shop command.
#[derive(Args)]
pub struct ShopArgs {
    /// Category to open first.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Skip the live rate refresh and use built-in rates.
    #[arg(long)]
    pub offline: bool,
}
