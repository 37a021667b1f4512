//! Terminal rendering for the storefront.
//!
//! Commands either talk to a person (styled notices, product tables, cart
//! listings) or, with `--json`, print one JSON document and keep stdout clean
//! of everything else. Notices go to stderr when they are problems.

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use rupasara_commerce::cart::{CartItem, CartTotals};
use rupasara_commerce::catalog::Product;
use rupasara_commerce::currency::CurrencyService;
use rupasara_commerce::Currency;
use rust_decimal::Decimal;
use std::time::Duration;
use url::Url;

const PRODUCT_COLUMNS: [(&str, usize); 4] =
    [("ID", 8), ("TITLE", 32), ("STYLE", 16), ("PRICE", 12)];

#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl Tone {
    fn glyph(self) -> StyledObject<&'static str> {
        match self {
            Tone::Info => style("ℹ").blue(),
            Tone::Success => style("✓").green(),
            Tone::Warn => style("⚠").yellow(),
            Tone::Error => style("✗").red(),
            Tone::Debug => style("→").dim(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Tone::Warn | Tone::Error | Tone::Debug)
    }
}

/// Where command output goes and how it looks.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn notice(&self, tone: Tone, msg: &str) {
        let line = match tone {
            Tone::Error => format!("{} {}", tone.glyph(), style(msg).red()),
            Tone::Debug => format!("{} {}", tone.glyph(), style(msg).dim()),
            _ => format!("{} {}", tone.glyph(), msg),
        };
        if tone.to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    pub fn info(&self, msg: &str) {
        if !self.json {
            self.notice(Tone::Info, msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if !self.json {
            self.notice(Tone::Success, msg);
        }
    }

    pub fn warn(&self, msg: &str) {
        if !self.json {
            self.notice(Tone::Warn, msg);
        }
    }

    /// Errors are reported in JSON mode too, as `{"error": ..}` on stderr.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            self.notice(Tone::Error, msg);
        }
    }

    /// Shown with `--verbose` only.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            self.notice(Tone::Debug, msg);
        }
    }

    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print `value` as pretty JSON, whatever the mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "could not render JSON output"),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if !self.json {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    pub fn text(&self, text: &str) {
        if !self.json {
            println!("{}", text);
        }
    }

    /// Left-aligned columns; `widths` pads all but overlong cells.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let cells: Vec<String> = cols
            .iter()
            .zip(widths)
            .map(|(col, width)| format!("{:width$}", col, width = *width))
            .collect();
        println!("  {}", cells.join("  ").trim_end());
    }

    /// Product table with prices in the selected currency.
    pub fn products(&self, products: &[&Product], currency: &CurrencyService) {
        if self.json || products.is_empty() {
            return;
        }
        let widths = PRODUCT_COLUMNS.map(|(_, width)| width);
        println!();
        self.table_row(&PRODUCT_COLUMNS.map(|(title, _)| title), &widths);
        for product in products {
            let formatted = currency.format(product.price);
            self.table_row(
                &[
                    product.id.as_str(),
                    product.title.as_str(),
                    product.style.as_str(),
                    formatted.as_str(),
                ],
                &widths,
            );
        }
    }

    /// A product as one list line: title, id and price.
    pub fn product_line(&self, product: &Product, currency: &CurrencyService) {
        self.kv(
            product.id.as_str(),
            &format!("{}  {}", product.title, price(product.price, currency)),
        );
    }

    /// Cart lines followed by the subtotal, plus the base amount when another
    /// currency is selected.
    pub fn cart(&self, items: &[CartItem], currency: &CurrencyService) {
        if self.json {
            return;
        }
        if items.is_empty() {
            self.info("Your cart is empty.");
            return;
        }

        for item in items {
            self.list_item(&format!(
                "{} {} x{}  {} each",
                item.title,
                muted(&format!("({}, {})", item.style, item.id)),
                item.qty,
                price(item.price, currency)
            ));
        }

        let totals = CartTotals::from_items(items);
        self.kv("Subtotal", &price(totals.subtotal, currency));
        if !currency.currency().is_base() {
            self.kv(
                "Base",
                &format!("{} {}", totals.subtotal.normalize(), Currency::BASE),
            );
        }
    }

    /// A WhatsApp hand-off: the message body and the link that opens it.
    pub fn chat_link(&self, message: &str, link: &Url) {
        if self.json {
            self.json(&serde_json::json!({ "link": link.as_str(), "text": message }));
            return;
        }
        self.text(message);
        self.kv("WhatsApp", link.as_str());
    }

    /// Spinner for waits on the network; hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// A base-currency amount converted and formatted for display, in bold.
pub fn price(amount: Decimal, currency: &CurrencyService) -> String {
    style(currency.format(amount)).bold().to_string()
}

/// Dim secondary text such as ids and slugs.
pub fn muted(text: &str) -> String {
    style(text).dim().to_string()
}
