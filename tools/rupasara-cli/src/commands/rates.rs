//! Exchange rate lookup.

use anyhow::Result;
use rupasara_commerce::money::format_amount;
use rupasara_commerce::Currency;
use serde::Serialize;

use super::RatesArgs;
use crate::context::Context;

#[derive(Serialize)]
struct RateRow {
    currency: Currency,
    factor: String,
    example: String,
}

#[derive(Serialize)]
struct RatesReport {
    live: bool,
    source: String,
    error: Option<String>,
    selected: Currency,
    rates: Vec<RateRow>,
}

/// Run the rates command.
pub async fn run(args: RatesArgs, ctx: &Context) -> Result<()> {
    let service = ctx.currency_service()?;
    let source = ctx.rate_source()?;

    let spinner = ctx
        .output
        .spinner(&format!("Fetching exchange rates from {}", source.endpoint()));
    let result = service.refresh_rates(source.as_ref()).await;
    spinner.finish_and_clear();

    let rates = service.rates();
    let report = RatesReport {
        live: result.is_ok(),
        source: source.endpoint().to_string(),
        error: result.as_ref().err().map(ToString::to_string),
        selected: service.currency(),
        rates: rates
            .iter()
            .map(|(currency, factor)| RateRow {
                currency,
                factor: factor.normalize().to_string(),
                example: format_amount(args.amount.saturating_mul(factor), currency),
            })
            .collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    match &report.error {
        None => ctx.output.success("Live rates"),
        Some(e) => ctx
            .output
            .warn(&format!("Could not refresh rates ({}). Showing built-in rates.", e)),
    }

    ctx.output.header(&format!(
        "{} {} in each currency",
        Currency::BASE.symbol(),
        args.amount
    ));
    let widths = [6, 12, 16];
    ctx.output.table_row(&["CODE", "FACTOR", "AMOUNT"], &widths);
    for row in &report.rates {
        let marker = if row.currency == report.selected {
            format!("{}*", row.currency)
        } else {
            row.currency.to_string()
        };
        ctx.output
            .table_row(&[marker.as_str(), row.factor.as_str(), row.example.as_str()], &widths);
    }
    Ok(())
}
