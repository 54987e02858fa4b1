//! Locale-tolerant decimal parsing for monetary amounts.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a monetary amount from free-form text.
///
/// Receipts and model output mix separator conventions: `"3,50"`,
/// `"1.234,56"` and `"1,234.56"` all occur in practice. When both symbols
/// are present, the one occurring last is the decimal separator and every
/// occurrence of the other is stripped as a grouping separator. A lone `,`
/// is treated as the decimal separator.
///
/// The normalized text is parsed with the plain decimal grammar of
/// [`Decimal::from_str`] (optional sign, digits, at most one dot), so no
/// precision is lost to an intermediate float. Returns `None` for empty
/// input or text that still fails after normalization (e.g. `"1.2.3"`);
/// such leftovers are never guessed at.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let has_dot = trimmed.contains('.');
    let has_comma = trimmed.contains(',');

    let normalized = if has_dot && has_comma {
        // Both present: the rightmost separator wins as the decimal point.
        match (trimmed.rfind('.'), trimmed.rfind(',')) {
            (Some(dot), Some(comma)) if dot > comma => trimmed.replace(',', ""),
            _ => trimmed.replace('.', "").replace(',', "."),
        }
    } else if has_comma {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized).ok()
}
