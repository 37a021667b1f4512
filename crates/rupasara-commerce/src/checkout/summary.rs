//! Plain-text order messages for the chat hand-off.

use crate::cart::{CartItem, CartTotals};
use crate::catalog::Product;
use crate::currency::CurrencyService;
use crate::money::{whole_units, Currency};

/// Opening line of a cart order message.
pub const ORDER_GREETING: &str = "Hello RUPASARA, I'd like to order:";

/// Generic help message for the chat button.
pub const HELP_GREETING: &str = "Hello RUPASARA! I\u{2019}d like help with a saree. \u{1f338}";

/// A cart rendered as an order message, one line per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<String>,
}

impl CartSummary {
    /// Render `items` with prices in the selected display currency.
    pub fn build(items: &[CartItem], currency: &CurrencyService) -> Self {
        let totals = CartTotals::from_items(items);

        let mut lines = Vec::with_capacity(items.len() + 2);
        lines.push(ORDER_GREETING.to_string());
        lines.extend(items.iter().map(|item| {
            format!(
                "\u{2022} {} ({}) x{} \u{2014} {} each",
                item.title,
                item.style,
                item.qty,
                currency.format(item.price)
            )
        }));
        lines.push(format!(
            "Subtotal: {} (base {} {})",
            currency.format(totals.subtotal),
            whole_units(totals.subtotal),
            Currency::BASE
        ));

        Self { lines }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// A single-product enquiry message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductEnquiry {
    pub text: String,
}

impl ProductEnquiry {
    pub fn build(product: &Product, currency: &CurrencyService) -> Self {
        let text = format!(
            "Hello RUPASARA, I want to order: {} ({}) \u{2014} {} ({} {} base)",
            product.title,
            product.style,
            currency.format(product.price),
            whole_units(product.price),
            Currency::BASE
        );
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rupasara_cache::Cache;
    use rust_decimal::Decimal;

    fn banarasi() -> Product {
        Product::new(
            "ban-01",
            "Classic Zari Banarasi",
            Decimal::from(1590),
            "Classic Zari",
        )
    }

    #[test]
    fn test_cart_summary_in_euros() {
        let currency = CurrencyService::new(Cache::in_memory());
        currency.set_currency(Currency::EUR);
        let items = vec![CartItem::from_product(&banarasi(), 3)];

        let summary = CartSummary::build(&items, &currency);

        assert_eq!(
            summary.lines,
            vec![
                ORDER_GREETING.to_string(),
                "\u{2022} Classic Zari Banarasi (Classic Zari) x3 \u{2014} \u{20ac}17.49 each"
                    .to_string(),
                "Subtotal: \u{20ac}52.47 (base 4770 INR)".to_string(),
            ]
        );
        assert_eq!(summary.text().lines().count(), 3);
    }

    #[test]
    fn test_empty_cart_summary() {
        let currency = CurrencyService::new(Cache::in_memory());
        let summary = CartSummary::build(&[], &currency);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[1], "Subtotal: \u{20b9}0 (base 0 INR)");
    }

    #[test]
    fn test_product_enquiry() {
        let currency = CurrencyService::new(Cache::in_memory());
        let enquiry = ProductEnquiry::build(&banarasi(), &currency);
        assert_eq!(
            enquiry.text,
            "Hello RUPASARA, I want to order: Classic Zari Banarasi (Classic Zari) \u{2014} \u{20b9}1,590 (1590 INR base)"
        );
    }
}
