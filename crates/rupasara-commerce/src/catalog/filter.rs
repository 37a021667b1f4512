//! Style filter for category listings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of the catch-all filter chip.
pub const ALL_STYLES: &str = "All";

/// Which products of a category to show.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StyleFilter {
    /// Every product in the category.
    #[default]
    All,
    /// Only products with this exact style tag.
    Style(String),
}

impl StyleFilter {
    /// Create a style filter.
    pub fn style(tag: impl Into<String>) -> Self {
        StyleFilter::Style(tag.into())
    }

    /// Parse a filter chip label. Blank input and `All` select every product.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case(ALL_STYLES) {
            StyleFilter::All
        } else {
            StyleFilter::Style(input.to_string())
        }
    }

    /// Check whether a product with `style` passes the filter.
    pub fn matches(&self, style: &str) -> bool {
        match self {
            StyleFilter::All => true,
            StyleFilter::Style(tag) => tag == style,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, StyleFilter::All)
    }
}

impl fmt::Display for StyleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleFilter::All => f.write_str(ALL_STYLES),
            StyleFilter::Style(tag) => f.write_str(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(StyleFilter::parse(""), StyleFilter::All);
        assert_eq!(StyleFilter::parse("all"), StyleFilter::All);
        assert_eq!(StyleFilter::parse(" Kadhua "), StyleFilter::style("Kadhua"));
    }

    #[test]
    fn test_style_match_is_exact() {
        let filter = StyleFilter::style("Classic Zari");
        assert!(filter.matches("Classic Zari"));
        assert!(!filter.matches("classic zari"));
        assert!(StyleFilter::All.matches("anything"));
    }
}
