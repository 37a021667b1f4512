//! Interactive shopping session.

use std::time::Duration;

use anyhow::{Context as _, Result};
use dialoguer::Input;
use rupasara_commerce::cart::CartStore;
use rupasara_commerce::catalog::{CatalogIndex, StyleFilter};
use rupasara_commerce::checkout::{
    CartSummary, ContactFields, OrderPipeline, ProductEnquiry, HELP_GREETING,
};
use rupasara_commerce::currency::CurrencyService;
use rupasara_commerce::{Currency, SubmitError};
use tokio::task::JoinHandle;

use super::catalog::{print_category, print_overview};
use super::ShopArgs;
use crate::config::ENV_INTAKE_URL;
use crate::context::Context;
use crate::output::price;
use crate::session::{self, SessionCommand, HELP};
use crate::whatsapp;

/// How long the session waits for live rates before opening with built-in ones.
const RATE_GRACE: Duration = Duration::from_secs(2);

struct Session<'a> {
    ctx: &'a Context,
    catalog: CatalogIndex,
    cart: CartStore,
    currency: CurrencyService,
    pipeline: OrderPipeline,
}

/// Run the shop command.
pub async fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let session = Session {
        ctx,
        catalog: ctx.catalog()?,
        cart: CartStore::new(),
        currency: ctx.currency_service()?,
        pipeline: ctx.order_pipeline()?,
    };

    if args.offline {
        ctx.output.debug("Offline: using built-in exchange rates");
    } else {
        let refresh = session.currency.spawn_refresh(ctx.rate_source()?);
        wait_for_rates(&session, refresh).await;
    }

    ctx.output.header("RUPASARA");
    ctx.output
        .info("Handwoven sarees. Type `help` for commands, `quit` to leave.");
    if !session.pipeline.is_configured() {
        ctx.output.debug(&format!(
            "No order intake configured ({}); orders go through WhatsApp",
            ENV_INTAKE_URL
        ));
    }

    let opening = args
        .category
        .as_deref()
        .and_then(|slug| session.catalog.find_category(slug))
        .or_else(|| session.catalog.first_category());
    if let Some(category) = opening {
        print_category(category, &StyleFilter::All, &session.currency, ctx);
    }

    loop {
        let line = prompt(session.prompt_label(), true).await?;
        let command = match session::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                ctx.output.warn(&e.to_string());
                continue;
            }
        };

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Empty => {}
            SessionCommand::Help => session.help(),
            SessionCommand::Add { id, qty } => session.add(&id, qty.as_deref().unwrap_or("1")),
            SessionCommand::Qty { id, qty } => session.set_qty(&id, &qty),
            SessionCommand::Remove { id } => session.remove(&id),
            SessionCommand::Cart => session.show_cart(),
            SessionCommand::Clear => {
                session.cart.clear();
                ctx.output.success("Cart cleared");
            }
            SessionCommand::Currency { code } => session.switch_currency(code.as_deref()),
            SessionCommand::Category { slug, style } => {
                session.browse(&slug, style.as_deref().unwrap_or(""))
            }
            SessionCommand::Order => session.order().await?,
            SessionCommand::WhatsApp { id: None } => session.whatsapp(),
            SessionCommand::WhatsApp { id: Some(id) } => session.enquire(&id),
        }
    }

    if !session.cart.is_empty() {
        ctx.output.info(&format!(
            "Leaving {} item(s) behind. The cart is not saved.",
            session.cart.totals().count
        ));
    }
    Ok(())
}

/// Show a spinner while the first rate refresh runs, up to a grace period.
/// The refresh keeps running in the background after that.
async fn wait_for_rates(session: &Session<'_>, mut refresh: JoinHandle<()>) {
    let spinner = session.ctx.output.spinner("Updating rates…");
    tokio::select! {
        _ = &mut refresh => {
            spinner.finish_and_clear();
        }
        _ = tokio::time::sleep(RATE_GRACE) => {
            spinner.finish_and_clear();
            session
                .ctx
                .output
                .debug("Rates still loading; prices use built-in rates until they arrive");
        }
    }
}

/// Read a line without blocking the runtime.
async fn prompt(label: String, allow_empty: bool) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        Input::<String>::new()
            .with_prompt(label)
            .allow_empty(allow_empty)
            .interact_text()
    })
    .await
    .context("Input task failed")?
    .context("Failed to read input")
}

impl Session<'_> {
    fn prompt_label(&self) -> String {
        let totals = self.cart.totals();
        let loading = if self.currency.is_loading_rates() {
            " updating rates…"
        } else {
            ""
        };
        format!(
            "{} \u{00b7} cart {} \u{00b7} {}{}",
            self.currency.currency(),
            totals.count,
            self.currency.format(totals.subtotal),
            loading
        )
    }

    fn help(&self) {
        self.ctx.output.header("Commands");
        for (usage, description) in HELP {
            self.ctx.output.kv(usage, description);
        }
    }

    fn add(&self, id: &str, qty: &str) {
        let Some(product) = self.catalog.find_product(id) else {
            self.ctx.output.warn(&format!("No saree with id '{}'", id));
            return;
        };
        self.cart.add(product, qty);
        let in_cart = self.cart.get(id).map(|item| item.qty).unwrap_or_default();
        self.ctx.output.success(&format!(
            "{} in cart: {} x{}",
            product.title,
            price(product.price, &self.currency),
            in_cart
        ));
    }

    fn set_qty(&self, id: &str, qty: &str) {
        if self.cart.set_qty(id, qty) {
            let now = self.cart.get(id).map(|item| item.qty).unwrap_or_default();
            self.ctx.output.success(&format!("{} quantity set to {}", id, now));
        } else {
            self.ctx.output.warn(&format!("'{}' is not in the cart", id));
        }
    }

    fn remove(&self, id: &str) {
        if self.cart.remove(id) {
            self.ctx.output.success(&format!("Removed {}", id));
        } else {
            self.ctx.output.warn(&format!("'{}' is not in the cart", id));
        }
    }

    fn show_cart(&self) {
        let items = self.cart.snapshot();
        if self.ctx.output.is_json() {
            self.ctx.output.json(&serde_json::json!({
                "currency": self.currency.currency(),
                "items": items,
                "totals": self.cart.totals(),
            }));
            return;
        }

        self.ctx.output.header("Your cart");
        self.ctx.output.cart(&items, &self.currency);
    }

    fn switch_currency(&self, code: Option<&str>) {
        let Some(code) = code else {
            self.ctx.output.info(&format!(
                "Showing prices in {}. Options: {}",
                self.currency.currency(),
                Currency::symbols_param()
            ));
            return;
        };
        match code.parse::<Currency>() {
            Ok(currency) => {
                self.currency.set_currency(currency);
                self.ctx
                    .output
                    .success(&format!("Prices now in {}", currency));
            }
            Err(e) => self.ctx.output.warn(&e.to_string()),
        }
    }

    fn browse(&self, slug: &str, style: &str) {
        match self.catalog.find_category(slug) {
            Some(category) => print_category(
                category,
                &StyleFilter::parse(style),
                &self.currency,
                self.ctx,
            ),
            None => {
                self.ctx
                    .output
                    .warn(&format!("No category '{}'. Showing the catalog.", slug));
                print_overview(&self.catalog, &self.currency, false, self.ctx);
            }
        }
    }

    async fn order(&self) -> Result<()> {
        if self.cart.is_empty() {
            self.ctx
                .output
                .warn("Your cart is empty; the order will have no items.");
        }

        let name = prompt("Full name".to_string(), true).await?;
        let phone = prompt("Phone / WhatsApp".to_string(), true).await?;
        let address = prompt("Shipping address".to_string(), true).await?;
        let notes = prompt("Notes (color, blouse, pallu pref, etc.)".to_string(), true).await?;
        let contact = ContactFields::new(name, phone, address).with_notes(notes);

        let spinner = self.ctx.output.spinner("Submitting order…");
        let result = self.pipeline.submit(&self.cart, contact).await;
        spinner.finish_and_clear();

        match result {
            Ok(receipt) => {
                self.ctx.output.success(&format!(
                    "Order submitted ({} item(s), {}). We will contact you shortly.",
                    receipt.payload.piece_count(),
                    self.currency.format(receipt.payload.subtotal)
                ));
                if self.ctx.output.is_json() {
                    self.ctx.output.json(&receipt);
                }
            }
            Err(SubmitError::MissingField(field)) => {
                self.ctx
                    .output
                    .warn(&format!("Please fill in your {}.", field));
            }
            Err(SubmitError::Unconfigured) => {
                self.ctx.output.warn(&format!(
                    "Online orders are not set up. Set {} to enable them, or order on WhatsApp:",
                    ENV_INTAKE_URL
                ));
                self.whatsapp();
            }
            Err(e @ SubmitError::SubmitFailed(_)) => {
                self.ctx.output.error(&e.to_string());
                self.ctx.output.info("Please try WhatsApp instead:");
                self.whatsapp();
            }
        }
        Ok(())
    }

    fn whatsapp(&self) {
        let items = self.cart.snapshot();
        let message = if items.is_empty() {
            HELP_GREETING.to_string()
        } else {
            CartSummary::build(&items, &self.currency).text()
        };
        self.send_chat_link(&message);
    }

    fn enquire(&self, id: &str) {
        match self.catalog.find_product(id) {
            Some(product) => {
                let enquiry = ProductEnquiry::build(product, &self.currency);
                self.send_chat_link(&enquiry.text);
            }
            None => self.ctx.output.warn(&format!("No saree with id '{}'", id)),
        }
    }

    fn send_chat_link(&self, message: &str) {
        match whatsapp::chat_link(&self.ctx.config.messaging.whatsapp_number, message) {
            Ok(link) => self.ctx.output.chat_link(message, &link),
            Err(e) => self
                .ctx
                .output
                .error(&format!("Could not build WhatsApp link: {}", e)),
        }
    }
}
