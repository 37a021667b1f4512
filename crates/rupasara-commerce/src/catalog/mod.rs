//! Product catalog module.
//!
//! Contains the taxonomy types (groups, categories, products), the style
//! filter used by category listings, and the read-only catalog index.

mod category;
mod filter;
mod index;
mod product;
mod taxonomy;

pub use category::{Category, Group};
pub use filter::{StyleFilter, ALL_STYLES};
pub use index::CatalogIndex;
pub use product::Product;
pub use taxonomy::Taxonomy;
