//! Currencies and display formatting.
//!
//! Every catalog price is authored in the base currency (INR). Amounts stay
//! `Decimal` end to end so that conversions like `4770 × 0.011` come out as
//! exactly `52.47` rather than a binary-float approximation.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currencies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Currency {
    /// Indian rupee, the base currency.
    #[default]
    INR,
    EUR,
    USD,
}

impl Currency {
    /// The currency all product prices are authored in.
    pub const BASE: Currency = Currency::INR;

    /// Every supported currency, base first.
    pub const ALL: [Currency; 3] = [Currency::INR, Currency::EUR, Currency::USD];

    /// Get the currency code (e.g., "INR").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "₹").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::EUR => "\u{20ac}",
            Currency::USD => "$",
        }
    }

    /// Fraction digits shown when formatting.
    ///
    /// Rupee prices are quoted in whole rupees.
    pub fn fraction_digits(&self) -> u32 {
        match self {
            Currency::INR => 0,
            Currency::EUR | Currency::USD => 2,
        }
    }

    pub fn is_base(&self) -> bool {
        *self == Currency::BASE
    }

    /// Parse a currency code string (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "INR" => Some(Currency::INR),
            "EUR" => Some(Currency::EUR),
            "USD" => Some(Currency::USD),
            _ => None,
        }
    }

    /// Comma-separated codes, e.g. `INR,EUR,USD`.
    pub fn symbols_param() -> String {
        Currency::ALL
            .iter()
            .map(Currency::code)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unsupported currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| UnknownCurrency(s.to_string()))
    }
}

/// Round to the currency's display precision, halves away from zero.
pub fn round_for_display(amount: Decimal, currency: Currency) -> Decimal {
    amount.round_dp_with_strategy(
        currency.fraction_digits(),
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Format an amount already expressed in `currency`, e.g. `₹4,770` or `€52.47`.
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    let digits = currency.fraction_digits() as usize;
    let rounded = round_for_display(amount, currency);
    let plain = format!("{:.*}", digits, rounded.abs());

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain.as_str(), None),
    };

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(currency.symbol());
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Whole base-currency units, as quoted next to converted prices ("1590 INR base").
pub fn whole_units(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Serde adapter for amounts in JSON.
///
/// Whole amounts are written as integers (`1590`), anything else as a float
/// (`52.47`). Both shapes are accepted when reading.
pub mod json_amount {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let amount = amount.normalize();
        if amount.scale() == 0 {
            if let Some(whole) = amount.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        rust_decimal::serde::float::serialize(&amount, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_rupees_have_no_fraction_digits() {
        assert_eq!(format_amount(dec("4770"), Currency::INR), "\u{20b9}4,770");
        assert_eq!(format_amount(dec("1590.4"), Currency::INR), "\u{20b9}1,590");
        assert_eq!(format_amount(dec("1590.5"), Currency::INR), "\u{20b9}1,591");
    }

    #[test]
    fn test_other_currencies_show_cents() {
        assert_eq!(format_amount(dec("52.47"), Currency::EUR), "\u{20ac}52.47");
        assert_eq!(format_amount(dec("57.2"), Currency::USD), "$57.20");
        assert_eq!(format_amount(dec("1234567.891"), Currency::USD), "$1,234,567.89");
    }

    #[test]
    fn test_zero_and_negative_amounts() {
        assert_eq!(format_amount(Decimal::ZERO, Currency::EUR), "\u{20ac}0.00");
        assert_eq!(format_amount(dec("-1200"), Currency::INR), "-\u{20b9}1,200");
        assert_eq!(format_amount(dec("-0.001"), Currency::USD), "$0.00");
    }

    #[test]
    fn test_grouping_boundaries() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("100000"), "100,000");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(" usd ".parse::<Currency>(), Ok(Currency::USD));
        assert!("GBP".parse::<Currency>().is_err());
        assert_eq!(Currency::symbols_param(), "INR,EUR,USD");
        assert!(Currency::INR.is_base());
        assert_eq!(Currency::default(), Currency::BASE);
    }

    #[test]
    fn test_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Currency::EUR).unwrap(), r#""EUR""#);
    }

    #[test]
    fn test_json_amounts_keep_whole_numbers_integral() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Line {
            #[serde(with = "json_amount")]
            price: Decimal,
        }

        let whole = serde_json::to_string(&Line { price: dec("1590.00") }).unwrap();
        assert_eq!(whole, r#"{"price":1590}"#);

        let fractional = serde_json::to_string(&Line { price: dec("52.47") }).unwrap();
        assert_eq!(fractional, r#"{"price":52.47}"#);

        let read: Line = serde_json::from_str(r#"{"price":1590.0}"#).unwrap();
        assert_eq!(read.price, dec("1590"));
    }
}
