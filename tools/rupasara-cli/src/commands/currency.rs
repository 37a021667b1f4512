//! Display currency preference.

use anyhow::{Context as _, Result};
use rupasara_commerce::Currency;
use serde_json::json;

use super::CurrencyArgs;
use crate::context::Context;

/// Run the currency command.
pub async fn run(args: CurrencyArgs, ctx: &Context) -> Result<()> {
    let service = ctx.currency_service()?;

    if args.reset {
        service
            .reset_currency()
            .context("Failed to clear the saved currency")?;
        ctx.output.success(&format!("Prices back in {}", Currency::BASE));
    } else if let Some(code) = args.code {
        let currency: Currency = code.parse()?;
        service.set_currency(currency);
        ctx.output.debug(&format!(
            "Saved to {}",
            ctx.state_dir().join("preferences.json").display()
        ));
        ctx.output
            .success(&format!("Prices will be shown in {} ({})", currency, currency.symbol()));
    }

    let current = service.currency();
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "currency": current,
            "supported": Currency::ALL,
        }));
        return Ok(());
    }

    ctx.output.header("Display currency");
    for currency in Currency::ALL {
        let marker = if currency == current { "*" } else { " " };
        let base = if currency.is_base() { " (base)" } else { "" };
        ctx.output.list_item(&format!(
            "{} {} {}{}",
            marker,
            currency.code(),
            currency.symbol(),
            base
        ));
    }
    Ok(())
}
