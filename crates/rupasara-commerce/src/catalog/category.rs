//! Category and group types for the storefront taxonomy.

use crate::catalog::{Product, StyleFilter};
use crate::ids::CategorySlug;
use serde::{Deserialize, Serialize};

/// A product category, e.g. Banarasi sarees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// URL-friendly slug, unique across the taxonomy.
    pub slug: CategorySlug,
    /// Category name.
    pub name: String,
    /// Category description.
    #[serde(default)]
    pub description: String,
    /// Hero image reference.
    #[serde(default)]
    pub hero: String,
    /// Style tags offered as filter chips, in display order.
    #[serde(default)]
    pub styles: Vec<String>,
    /// Products, in display order. May be empty.
    #[serde(default)]
    pub products: Vec<Product>,
}

impl Category {
    /// Create an empty category.
    pub fn new(slug: impl Into<CategorySlug>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            description: String::new(),
            hero: String::new(),
            styles: Vec::new(),
            products: Vec::new(),
        }
    }

    /// Products passing `filter`, in catalog order.
    pub fn filter(&self, filter: &StyleFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(&p.style))
            .collect()
    }

    /// Filter chip labels: `All` followed by the category's styles.
    pub fn filter_options(&self) -> Vec<StyleFilter> {
        std::iter::once(StyleFilter::All)
            .chain(self.styles.iter().map(StyleFilter::style))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A display-only grouping of categories in the navigation menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    /// Menu label, e.g. "Heritage Weaves".
    pub label: String,
    /// Categories in display order.
    pub categories: Vec<Category>,
}

impl Group {
    /// Menu anchor derived from the label: lower-cased, with runs of
    /// non-alphanumeric characters collapsed to a single `-`.
    pub fn anchor(&self) -> String {
        let mut anchor = String::with_capacity(self.label.len());
        let mut pending_dash = false;
        for ch in self.label.chars() {
            if ch.is_alphanumeric() {
                if pending_dash && !anchor.is_empty() {
                    anchor.push('-');
                }
                pending_dash = false;
                anchor.extend(ch.to_lowercase());
            } else {
                pending_dash = true;
            }
        }
        anchor
    }
}
