//! Cart and pricing engine for the RUPASARA storefront.
//!
//! This crate holds the storefront's client-side state:
//!
//! - **Catalog**: the compiled-in taxonomy of groups, categories and
//!   products, indexed for slug and product lookups and style filtering
//! - **Cart**: the shared cart store with quantity coercion and derived totals
//! - **Currency**: display-currency selection, exchange rates with a
//!   background refresh, conversion and formatting
//! - **Checkout**: order payloads, the intake submission pipeline, and
//!   plain-text order messages
//!
//! All prices are authored in INR and kept as `Decimal`; only display goes
//! through a conversion.
//!
//! # Example
//!
//! ```rust,ignore
//! use rupasara_commerce::prelude::*;
//!
//! let catalog = CatalogIndex::builtin()?;
//! let cart = CartStore::new();
//! let currency = CurrencyService::new(Cache::open(".rupasara/preferences.json")?);
//! currency.spawn_refresh(Arc::new(HttpRateSource::default()));
//!
//! let saree = catalog.find_product("ban-01").unwrap();
//! cart.add(saree, 1);
//! cart.add(saree, "2");
//!
//! currency.set_currency(Currency::EUR);
//! println!("Subtotal: {}", currency.format(cart.totals().subtotal));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod currency;

pub use error::{CommerceError, RateFetchError, SubmitError};
pub use ids::*;
pub use money::Currency;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, RateFetchError, SubmitError};
    pub use crate::ids::*;
    pub use crate::money::{format_amount, Currency};

    // Catalog
    pub use crate::catalog::{CatalogIndex, Category, Group, Product, StyleFilter, Taxonomy};

    // Cart
    pub use crate::cart::{parse_quantity, CartItem, CartStore, CartTotals, QuantityInput};

    // Currency
    pub use crate::currency::{CurrencyService, HttpRateSource, RateSource, RateTable};

    // Checkout
    pub use crate::checkout::{
        CartSummary, ContactFields, HttpIntake, IntakeTransport, OrderPayload, OrderPipeline,
        OrderReceipt, ProductEnquiry,
    };
}
