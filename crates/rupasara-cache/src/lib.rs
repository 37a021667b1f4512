//! Type-safe key-value store for RUPASARA client-local preferences.
//!
//! Values are stored as JSON, either purely in memory or mirrored to a single
//! JSON file on disk so they survive restarts (the storefront keeps the
//! shopper's selected display currency here).
//!
//! # Example
//!
//! ```rust,ignore
//! use rupasara_cache::Cache;
//!
//! let cache = Cache::open(".rupasara/preferences.json")?;
//!
//! cache.set("currency", &"EUR")?;
//! let currency: Option<String> = cache.get("currency")?;
//! cache.delete("currency")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;
