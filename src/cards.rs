//! Dashboard cards: a title and one scalar output shown as a whole number.

use crate::config::Card;
use crate::error::Result;
use crate::format::{float_to_int_string, float_to_int_string_locale};
use crate::models::ProcessData;

/// Displayed value of `card`, e.g. `"24730 Mt"`.
pub fn card_text(card: &Card, process: &ProcessData) -> Result<String> {
    let value = process.float_output(&card.key)?;
    Ok(with_unit(float_to_int_string(value), &card.unit))
}

/// Same as [`card_text`], grouping thousands for `locale_tag` (e.g. `"24,730 Mt"`).
pub fn card_text_locale(card: &Card, process: &ProcessData, locale_tag: &str) -> Result<String> {
    let value = process.float_output(&card.key)?;
    Ok(with_unit(float_to_int_string_locale(value, locale_tag), &card.unit))
}

/// `(title, text)` of every card, in definition order.
pub fn render_cards(
    cards: &[Card],
    process: &ProcessData,
    locale_tag: &str,
) -> Result<Vec<(String, String)>> {
    cards
        .iter()
        .map(|c| Ok((c.title.clone(), card_text_locale(c, process, locale_tag)?)))
        .collect()
}

fn with_unit(value: String, unit: &str) -> String {
    if unit.trim().is_empty() {
        value
    } else {
        format!("{value} {}", unit.trim())
    }
}
