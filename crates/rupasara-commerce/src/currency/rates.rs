//! Exchange rate tables.

use crate::error::RateFetchError;
use crate::money::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Multiplicative factors from the base currency to each supported currency.
///
/// A table always has a positive factor for every supported currency and a
/// base factor of exactly 1. Tables are replaced whole, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    factors: BTreeMap<Currency, Decimal>,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::fallback()
    }
}

impl RateTable {
    /// Approximate rates used until a refresh succeeds.
    pub fn fallback() -> Self {
        let factors = BTreeMap::from([
            (Currency::INR, Decimal::ONE),
            (Currency::EUR, Decimal::new(11, 3)),
            (Currency::USD, Decimal::new(12, 3)),
        ]);
        Self { factors }
    }

    /// Build a table, rejecting it unless it covers every supported currency
    /// with a positive factor and the base factor is 1.
    pub fn from_factors(
        factors: impl IntoIterator<Item = (Currency, Decimal)>,
    ) -> Result<Self, RateFetchError> {
        let factors: BTreeMap<_, _> = factors.into_iter().collect();

        for currency in Currency::ALL {
            let factor = *factors
                .get(&currency)
                .ok_or(RateFetchError::Incomplete(currency))?;

            let valid = if currency.is_base() {
                factor == Decimal::ONE
            } else {
                factor > Decimal::ZERO
            };
            if !valid {
                return Err(RateFetchError::Invalid {
                    currency,
                    value: factor.to_string(),
                });
            }
        }

        Ok(Self { factors })
    }

    /// Parse a `{ "rates": { "<CODE>": <factor>, .. } }` response body.
    ///
    /// Codes outside the supported set are ignored.
    pub fn from_response(body: &Value) -> Result<Self, RateFetchError> {
        let rates = body
            .get("rates")
            .and_then(Value::as_object)
            .ok_or_else(|| RateFetchError::Malformed("missing \"rates\" object".into()))?;

        let mut factors = Vec::with_capacity(Currency::ALL.len());
        for currency in Currency::ALL {
            let value = match rates.get(currency.code()) {
                None | Some(Value::Null) => return Err(RateFetchError::Incomplete(currency)),
                Some(value) => value,
            };
            let factor = value
                .as_number()
                .and_then(parse_factor)
                .ok_or_else(|| RateFetchError::Invalid {
                    currency,
                    value: value.to_string(),
                })?;
            factors.push((currency, factor));
        }

        Self::from_factors(factors)
    }

    /// Factor for `currency`, or 1 if the table has none.
    pub fn factor(&self, currency: Currency) -> Decimal {
        self.get(currency).unwrap_or(Decimal::ONE)
    }

    pub fn get(&self, currency: Currency) -> Option<Decimal> {
        self.factors.get(&currency).copied()
    }

    /// Factors in currency order, base first.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, Decimal)> + '_ {
        self.factors.iter().map(|(c, f)| (*c, *f))
    }
}

// JSON numbers go through their textual form so that 0.011 stays 0.011.
fn parse_factor(number: &serde_json::Number) -> Option<Decimal> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
