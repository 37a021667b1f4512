//! Product types.

use crate::ids::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the base currency.
    #[serde(with = "crate::money::json_amount")]
    pub price: Decimal,
    /// Style tag, one of the owning category's styles.
    pub style: String,
    /// Image references; the first one is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Create a product with no images.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: Decimal,
        style: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            style: style.into(),
            images: Vec::new(),
        }
    }

    /// Append an image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }

    /// The primary image, if the product has any.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
