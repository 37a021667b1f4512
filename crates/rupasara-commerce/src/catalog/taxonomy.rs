//! The storefront taxonomy document.

use crate::catalog::Group;
use crate::error::CommerceError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The RUPASARA taxonomy, compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Groups of categories of products, as authored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Taxonomy {
    pub groups: Vec<Group>,
}

impl Taxonomy {
    /// Load the compiled-in taxonomy.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a taxonomy document.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let taxonomy: Taxonomy = serde_json::from_str(json)
            .map_err(|e| CommerceError::InvalidCatalog(e.to_string()))?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Check that category slugs are unique and every price is positive.
    ///
    /// Product ids may repeat across categories; lookups resolve to the first.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut slugs = HashSet::new();
        for category in self.groups.iter().flat_map(|g| &g.categories) {
            if category.slug.as_str().is_empty() {
                return Err(CommerceError::InvalidCatalog(format!(
                    "category '{}' has an empty slug",
                    category.name
                )));
            }
            if !slugs.insert(category.slug.as_str()) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "duplicate category slug '{}'",
                    category.slug
                )));
            }
            if let Some(product) = category.products.iter().find(|p| p.price <= Decimal::ZERO) {
                return Err(CommerceError::InvalidCatalog(format!(
                    "product '{}' in '{}' has non-positive price {}",
                    product.id, category.slug, product.price
                )));
            }
        }
        Ok(())
    }
}
