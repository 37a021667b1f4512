//! Newtype identifiers.
//!
//! Product ids and category slugs are both plain strings in the catalog
//! configuration; wrapping them keeps a slug from being passed where a
//! product id is expected.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

define_id!(
    /// Catalog product identifier, e.g. `ban-01`. Also the identity of a cart line.
    ProductId
);
define_id!(
    /// URL-safe category slug, e.g. `banarasi`.
    CategorySlug
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compares_against_str() {
        let id = ProductId::new("ban-01");
        assert_eq!(id, "ban-01");
        assert_eq!(id.as_str(), "ban-01");
        assert_eq!(id.to_string(), "ban-01");
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let slug = CategorySlug::from("mysore-silk");
        assert_eq!(serde_json::to_string(&slug).unwrap(), r#""mysore-silk""#);

        let back: CategorySlug = serde_json::from_str(r#""mysore-silk""#).unwrap();
        assert_eq!(back, slug);
    }
}
