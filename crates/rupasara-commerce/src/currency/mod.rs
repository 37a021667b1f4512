//! Multi-currency price display.
//!
//! Rates are fetched in the background and applied whole; until a fetch
//! succeeds the service converts with built-in approximate rates.

mod rates;
mod service;
mod source;

pub use rates::RateTable;
pub use service::{CurrencyService, CURRENCY_PREFERENCE_KEY};
pub use source::{HttpRateSource, RateSource, DEFAULT_RATES_ENDPOINT};
