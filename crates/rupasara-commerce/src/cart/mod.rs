//! Shopping cart module.
//!
//! The cart store holds one line per product and derives its totals on
//! every read.

mod pricing;
mod quantity;
mod store;

pub use pricing::CartTotals;
pub use quantity::{parse_quantity, QuantityInput};
pub use store::{CartItem, CartStore};
