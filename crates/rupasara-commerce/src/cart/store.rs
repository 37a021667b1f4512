//! The shared cart store.

use crate::cart::{parse_quantity, CartTotals, QuantityInput};
use crate::catalog::Product;
use crate::ids::ProductId;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// A cart line: a projection of the product plus a quantity.
///
/// Identity is the product id; a cart holds at most one line per id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the base currency.
    #[serde(with = "crate::money::json_amount")]
    pub price: Decimal,
    pub style: String,
    /// Primary product image.
    pub image: Option<String>,
    /// Always `>= 1`.
    pub qty: u32,
}

impl CartItem {
    /// Project a catalog product into a cart line.
    pub fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            style: product.style.clone(),
            image: product.primary_image().map(str::to_string),
            qty: qty.max(1),
        }
    }

    /// price × qty.
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.qty))
    }
}

/// The session's cart.
///
/// A cheaply clonable handle; clones share the same lines. Each mutation is
/// applied under a single write lock, then announced by bumping the revision
/// observed through [`CartStore::subscribe`].
#[derive(Debug, Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    items: RwLock<Vec<CartItem>>,
    revision: watch::Sender<u64>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                items: RwLock::new(Vec::new()),
                revision,
            }),
        }
    }

    /// Add `qty` of a product.
    ///
    /// An existing line for the same id grows by the coerced quantity;
    /// otherwise a new line is appended.
    pub fn add(&self, product: &Product, qty: impl QuantityInput) {
        let qty = parse_quantity(&qty);
        {
            let mut items = self.inner.items.write();
            match items.iter_mut().find(|item| item.id == product.id) {
                Some(existing) => existing.qty = existing.qty.saturating_add(qty),
                None => items.push(CartItem::from_product(product, qty)),
            }
        }
        tracing::debug!(product = %product.id, qty, "added to cart");
        self.bump();
    }

    /// Remove a line. Returns `false` if there was nothing to remove.
    pub fn remove(&self, id: &str) -> bool {
        let removed = {
            let mut items = self.inner.items.write();
            let before = items.len();
            items.retain(|item| item.id != id);
            items.len() != before
        };
        if removed {
            tracing::debug!(product = id, "removed from cart");
            self.bump();
        }
        removed
    }

    /// Set a line's quantity. Returns `false` if the id is not in the cart.
    pub fn set_qty(&self, id: &str, qty: impl QuantityInput) -> bool {
        let qty = parse_quantity(&qty).max(1);
        let updated = {
            let mut items = self.inner.items.write();
            match items.iter_mut().find(|item| item.id == id) {
                Some(item) => {
                    item.qty = qty;
                    true
                }
                None => false,
            }
        };
        if updated {
            tracing::debug!(product = id, qty, "updated quantity");
            self.bump();
        }
        updated
    }

    /// Empty the cart.
    pub fn clear(&self) {
        let had_items = {
            let mut items = self.inner.items.write();
            let had_items = !items.is_empty();
            items.clear();
            had_items
        };
        if had_items {
            tracing::debug!("cleared cart");
            self.bump();
        }
    }

    /// Copy of the current lines, unaffected by later mutations.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.inner.items.read().clone()
    }

    /// Look up a single line.
    pub fn get(&self, id: &str) -> Option<CartItem> {
        self.inner
            .items
            .read()
            .iter()
            .find(|item| item.id == id)
            .cloned()
    }

    /// Totals over the current lines.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_items(&self.inner.items.read())
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.inner.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.read().is_empty()
    }

    /// Observe changes. The value is a revision counter that increases on
    /// every mutation that changed the cart.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Current revision.
    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    fn bump(&self) {
        self.inner.revision.send_modify(|rev| *rev += 1);
    }
}
