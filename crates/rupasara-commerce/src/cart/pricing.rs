//! Cart totals.

use crate::cart::CartItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Totals derived from the current cart lines.
///
/// Always recomputed from the items; never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Σ price × qty, in the base currency.
    pub subtotal: Decimal,
    /// Σ qty, shown as the cart badge.
    pub count: u64,
    /// Number of distinct lines.
    pub unique: usize,
}

impl CartTotals {
    /// Compute totals for a sequence of cart lines.
    pub fn from_items(items: &[CartItem]) -> Self {
        items.iter().fold(
            CartTotals {
                unique: items.len(),
                ..CartTotals::default()
            },
            |mut totals, item| {
                totals.subtotal = totals.subtotal.saturating_add(item.line_total());
                totals.count += u64::from(item.qty);
                totals
            },
        )
    }

    pub fn is_empty(&self) -> bool {
        self.unique == 0
    }
}
