//! End-to-end behaviour of the storefront engine against the built-in catalog.
//!
//! Network seams are replaced with in-process fakes.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rupasara_cache::Cache;
use rupasara_commerce::prelude::*;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn catalog() -> CatalogIndex {
    CatalogIndex::builtin().expect("built-in catalog is valid")
}

fn contact() -> ContactFields {
    ContactFields::new("Asha Rao", "+91 98765 43210", "12 MG Road, Bengaluru")
        .with_notes("Blouse in maroon")
}

#[derive(Default)]
struct RecordingIntake {
    delivered: Mutex<Vec<OrderPayload>>,
}

#[async_trait]
impl IntakeTransport for RecordingIntake {
    async fn deliver(&self, payload: &OrderPayload) -> Result<u16, SubmitError> {
        self.delivered.lock().push(payload.clone());
        Ok(200)
    }
}

struct RejectingIntake;

#[async_trait]
impl IntakeTransport for RejectingIntake {
    async fn deliver(&self, _payload: &OrderPayload) -> Result<u16, SubmitError> {
        Err(SubmitError::SubmitFailed("HTTP 500: script error".into()))
    }
}

struct JsonRateSource(serde_json::Value);

#[async_trait]
impl RateSource for JsonRateSource {
    async fn fetch_rates(&self) -> Result<RateTable, RateFetchError> {
        RateTable::from_response(&self.0)
    }
}

#[test]
fn test_repeated_adds_merge_into_one_line() {
    let catalog = catalog();
    let cart = CartStore::new();
    let banarasi = catalog.find_product("ban-01").unwrap();

    cart.add(banarasi, 1);
    cart.add(banarasi, 2);

    let items = cart.snapshot();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].qty, 3);
    assert_eq!(cart.totals().subtotal, dec("4770"));
    assert_eq!(cart.totals().count, 3);
}

#[test]
fn test_subtotal_is_exact_and_reads_are_idempotent() {
    let catalog = catalog();
    let cart = CartStore::new();
    cart.add(catalog.find_product("ban-02").unwrap(), 2);
    cart.add(catalog.find_product("kal-03").unwrap(), "3");

    let expected = dec("1890") * dec("2") + dec("89") * dec("3");
    assert_eq!(cart.totals().subtotal, expected);
    assert_eq!(cart.totals(), cart.totals());
    assert_eq!(cart.totals().unique, 2);
}

#[test]
fn test_unusable_quantity_becomes_one() {
    let catalog = catalog();
    let cart = CartStore::new();
    cart.add(catalog.find_product("ban-01").unwrap(), 4);

    assert!(cart.set_qty("ban-01", "abc"));
    assert_eq!(cart.get("ban-01").unwrap().qty, 1);
}

#[test]
fn test_removing_twice_is_harmless() {
    let catalog = catalog();
    let cart = CartStore::new();
    cart.add(catalog.find_product("kal-01").unwrap(), 1);

    assert!(cart.remove("kal-01"));
    assert!(!cart.remove("kal-01"));
    assert!(cart.totals().is_empty());
}

#[test]
fn test_category_lookup_and_style_filter() {
    let catalog = catalog();
    let banarasi = catalog.find_category("banarasi").unwrap();

    let kadhua = banarasi.filter(&StyleFilter::parse("Kadhua"));
    assert_eq!(kadhua.len(), 1);
    assert_eq!(kadhua[0].id, "ban-02");
    assert_eq!(banarasi.filter(&StyleFilter::parse("All")).len(), 4);

    assert!(catalog.find_category("kanjeevaram").is_none());
}

#[test]
fn test_base_currency_conversion_is_identity() {
    let currency = CurrencyService::new(Cache::in_memory());
    for amount in ["0", "1", "89", "4770", "1590.50"] {
        assert_eq!(currency.convert(dec(amount)), dec(amount));
    }
}

#[test]
fn test_euro_conversion_of_three_banarasi() {
    let catalog = catalog();
    let cart = CartStore::new();
    let currency = CurrencyService::new(Cache::in_memory());
    currency.set_currency(Currency::EUR);

    let banarasi = catalog.find_product("ban-01").unwrap();
    cart.add(banarasi, 1);
    cart.add(banarasi, 2);

    let subtotal = cart.totals().subtotal;
    assert_eq!(currency.convert(subtotal), dec("52.47"));
    assert_eq!(currency.format(subtotal), "\u{20ac}52.47");
}

#[tokio::test]
async fn test_incomplete_rate_response_changes_nothing() {
    let currency = CurrencyService::new(Cache::in_memory());
    currency.set_currency(Currency::USD);
    let before = currency.rates();

    let source = JsonRateSource(serde_json::json!({
        "rates": { "INR": 1, "EUR": 0.0109 }
    }));
    let result = currency.refresh_rates(&source).await;

    assert_eq!(result, Err(RateFetchError::Incomplete(Currency::USD)));
    assert_eq!(currency.rates(), before);
    assert_eq!(currency.convert(dec("4770")), dec("57.24"));
}

#[tokio::test]
async fn test_complete_rate_response_applies_in_background() {
    let currency = CurrencyService::new(Cache::in_memory());
    currency.set_currency(Currency::EUR);

    let source = Arc::new(JsonRateSource(serde_json::json!({
        "base": "INR",
        "rates": { "INR": 1, "EUR": 0.01, "USD": 0.012 }
    })));
    currency.spawn_refresh(source).await.unwrap();

    assert!(!currency.is_loading_rates());
    assert_eq!(currency.format(dec("4770")), "\u{20ac}47.70");
}

#[tokio::test]
async fn test_unconfigured_submit_keeps_the_cart() {
    let catalog = catalog();
    let cart = CartStore::new();
    cart.add(catalog.find_product("ban-01").unwrap(), 1);
    cart.add(catalog.find_product("kal-02").unwrap(), 1);

    let err = OrderPipeline::unconfigured()
        .submit(&cart, contact())
        .await
        .unwrap_err();

    assert_eq!(err, SubmitError::Unconfigured);
    assert_eq!(cart.len(), 2);
}

#[tokio::test]
async fn test_successful_submit_clears_cart_and_allows_empty_resubmit() {
    let catalog = catalog();
    let cart = CartStore::new();
    cart.add(catalog.find_product("ban-01").unwrap(), 3);
    cart.add(catalog.find_product("kal-04").unwrap(), 1);

    let intake = Arc::new(RecordingIntake::default());
    let pipeline = OrderPipeline::new(intake.clone());

    let receipt = pipeline.submit(&cart, contact()).await.unwrap();
    assert_eq!(receipt.payload.subtotal, dec("4899"));
    assert_eq!(receipt.payload.notes.as_deref(), Some("Blouse in maroon"));
    assert!(cart.is_empty());

    let second = pipeline.submit(&cart, contact()).await.unwrap();
    assert!(second.payload.items.is_empty());
    assert_eq!(second.payload.subtotal, Decimal::ZERO);
    assert_eq!(intake.delivered.lock().len(), 2);
}

#[tokio::test]
async fn test_failed_submit_leaves_cart_untouched() {
    let catalog = catalog();
    let cart = CartStore::new();
    cart.add(catalog.find_product("ban-03").unwrap(), 2);
    let before = cart.snapshot();

    let err = OrderPipeline::new(Arc::new(RejectingIntake))
        .submit(&cart, contact())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::SubmitFailed(_)));
    assert_eq!(cart.snapshot(), before);
}

#[test]
fn test_whatsapp_summary_follows_display_currency() {
    let catalog = catalog();
    let cart = CartStore::new();
    let currency = CurrencyService::new(Cache::in_memory());
    cart.add(catalog.find_product("ban-01").unwrap(), 3);

    let inr = CartSummary::build(&cart.snapshot(), &currency);
    assert_eq!(inr.lines.last().unwrap(), "Subtotal: \u{20b9}4,770 (base 4770 INR)");

    currency.set_currency(Currency::USD);
    let usd = CartSummary::build(&cart.snapshot(), &currency);
    assert_eq!(usd.lines.last().unwrap(), "Subtotal: $57.24 (base 4770 INR)");
}
