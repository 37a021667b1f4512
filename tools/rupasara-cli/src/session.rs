//! Command parsing for the interactive shop session.

use thiserror::Error;

/// One line of shop-session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// `add <id> [qty]`
    Add { id: String, qty: Option<String> },
    /// `qty <id> <qty>`
    Qty { id: String, qty: String },
    /// `rm <id>`
    Remove { id: String },
    /// `cart`
    Cart,
    /// `clear`
    Clear,
    /// `currency [CODE]`
    Currency { code: Option<String> },
    /// `category <slug> [style...]`
    Category { slug: String, style: Option<String> },
    /// `order`
    Order,
    /// `whatsapp [id]`: the cart, or a single product enquiry.
    WhatsApp { id: Option<String> },
    /// `help`
    Help,
    /// `quit`
    Quit,
    /// Blank line.
    Empty,
}

/// Input that could not be understood.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown command '{0}'. Type `help` for a list of commands.")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Session help, one command per line.
pub const HELP: &[(&str, &str)] = &[
    ("add <id> [qty]", "add a product to the cart"),
    ("qty <id> <qty>", "change a line's quantity"),
    ("rm <id>", "remove a line"),
    ("cart", "show the cart"),
    ("clear", "empty the cart"),
    ("currency [CODE]", "show or switch the display currency (INR, EUR, USD)"),
    ("category <slug> [style]", "browse a category, optionally by style"),
    ("order", "submit the cart as an order"),
    ("whatsapp [id]", "get a WhatsApp link for the cart, or to ask about one saree"),
    ("help", "show this help"),
    ("quit", "leave the shop"),
];

/// Parse one input line.
pub fn parse(line: &str) -> Result<SessionCommand, SessionError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(SessionCommand::Empty);
    };
    let rest: Vec<&str> = words.collect();

    let cmd = match command.to_lowercase().as_str() {
        "add" => match rest.as_slice() {
            [id] => SessionCommand::Add {
                id: id.to_string(),
                qty: None,
            },
            [id, qty] => SessionCommand::Add {
                id: id.to_string(),
                qty: Some(qty.to_string()),
            },
            _ => return Err(SessionError::Usage("add <id> [qty]")),
        },
        "qty" => match rest.as_slice() {
            [id, qty] => SessionCommand::Qty {
                id: id.to_string(),
                qty: qty.to_string(),
            },
            _ => return Err(SessionError::Usage("qty <id> <qty>")),
        },
        "rm" | "remove" => match rest.as_slice() {
            [id] => SessionCommand::Remove { id: id.to_string() },
            _ => return Err(SessionError::Usage("rm <id>")),
        },
        "cart" => SessionCommand::Cart,
        "clear" => SessionCommand::Clear,
        "currency" => match rest.as_slice() {
            [] => SessionCommand::Currency { code: None },
            [code] => SessionCommand::Currency {
                code: Some(code.to_string()),
            },
            _ => return Err(SessionError::Usage("currency [CODE]")),
        },
        "category" | "cat" => match rest.split_first() {
            Some((slug, style)) => SessionCommand::Category {
                slug: slug.to_string(),
                style: (!style.is_empty()).then(|| style.join(" ")),
            },
            None => return Err(SessionError::Usage("category <slug> [style]")),
        },
        "order" | "checkout" => SessionCommand::Order,
        "whatsapp" | "wa" => match rest.as_slice() {
            [] => SessionCommand::WhatsApp { id: None },
            [id] => SessionCommand::WhatsApp {
                id: Some(id.to_string()),
            },
            _ => return Err(SessionError::Usage("whatsapp [id]")),
        },
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(SessionError::UnknownCommand(other.to_string())),
    };
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_with_and_without_qty() {
        assert_eq!(
            parse("add ban-01").unwrap(),
            SessionCommand::Add {
                id: "ban-01".into(),
                qty: None
            }
        );
        assert_eq!(
            parse("  ADD ban-01 3 ").unwrap(),
            SessionCommand::Add {
                id: "ban-01".into(),
                qty: Some("3".into())
            }
        );
        assert_eq!(parse("add"), Err(SessionError::Usage("add <id> [qty]")));
    }

    #[test]
    fn test_qty_keeps_raw_text() {
        assert_eq!(
            parse("qty ban-01 abc").unwrap(),
            SessionCommand::Qty {
                id: "ban-01".into(),
                qty: "abc".into()
            }
        );
    }

    #[test]
    fn test_category_style_may_have_spaces() {
        assert_eq!(
            parse("category banarasi Classic Zari").unwrap(),
            SessionCommand::Category {
                slug: "banarasi".into(),
                style: Some("Classic Zari".into())
            }
        );
        assert_eq!(
            parse("cat silk").unwrap(),
            SessionCommand::Category {
                slug: "silk".into(),
                style: None
            }
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("").unwrap(), SessionCommand::Empty);
        assert_eq!(parse("cart").unwrap(), SessionCommand::Cart);
        assert_eq!(parse("wa").unwrap(), SessionCommand::WhatsApp { id: None });
        assert_eq!(parse("exit").unwrap(), SessionCommand::Quit);
        assert_eq!(
            parse("currency eur").unwrap(),
            SessionCommand::Currency {
                code: Some("eur".into())
            }
        );
    }

    #[test]
    fn test_whatsapp_for_one_product() {
        assert_eq!(
            parse("whatsapp ban-01").unwrap(),
            SessionCommand::WhatsApp {
                id: Some("ban-01".into())
            }
        );
        assert_eq!(
            parse("wa ban-01 slk-01"),
            Err(SessionError::Usage("whatsapp [id]"))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("buy ban-01"),
            Err(SessionError::UnknownCommand("buy".into()))
        );
    }
}
