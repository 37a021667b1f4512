//! Order types.

use crate::cart::{CartItem, CartTotals};
use crate::error::SubmitError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contact details captured by the order form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    /// Phone or WhatsApp number.
    pub phone: String,
    /// Shipping address.
    pub address: String,
    /// Free-form notes (colour, blouse, pallu preference...).
    pub notes: Option<String>,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            notes: None,
        }
    }

    /// Attach notes. Blank notes are dropped.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        let notes = notes.into();
        self.notes = if notes.trim().is_empty() {
            None
        } else {
            Some(notes)
        };
        self
    }

    /// Required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        missing
    }

    /// Fail with the first blank required field.
    pub fn validate(&self) -> Result<(), SubmitError> {
        match self.missing_fields().first().copied() {
            Some(field) => Err(SubmitError::MissingField(field)),
            None => Ok(()),
        }
    }
}

/// The order sent to the intake endpoint.
///
/// Built once at submit time from a cart snapshot and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPayload {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
    pub items: Vec<CartItem>,
    /// Σ price × qty, in the base currency.
    #[serde(with = "crate::money::json_amount")]
    pub subtotal: Decimal,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl OrderPayload {
    /// Build a payload from contact details and a cart snapshot.
    pub fn new(contact: ContactFields, items: Vec<CartItem>, created_at: DateTime<Utc>) -> Self {
        let subtotal = CartTotals::from_items(&items).subtotal;
        Self {
            name: contact.name,
            phone: contact.phone,
            address: contact.address,
            notes: contact.notes,
            items,
            subtotal,
            created_at,
        }
    }

    /// Total number of pieces ordered.
    pub fn piece_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2025-01-31T09:30:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&text)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
