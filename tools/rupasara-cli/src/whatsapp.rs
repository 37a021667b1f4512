//! `wa.me` click-to-chat links.

use url::Url;

/// Build `https://wa.me/<number>?text=<message>`.
///
/// Non-digit characters in `number` (spaces, `+`, dashes) are dropped.
pub fn chat_link(number: &str, message: &str) -> Result<Url, url::ParseError> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    let mut link = Url::parse("https://wa.me/")?.join(&digits)?;
    link.query_pairs_mut().append_pair("text", message);
    Ok(link)
}
