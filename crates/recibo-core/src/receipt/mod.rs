//! Receipt response parsing and editing.

mod amount;
mod edit;
mod parser;

pub use amount::parse_amount;
pub use edit::ItemEdit;
pub use parser::ReceiptParser;

use crate::models::receipt::ScannedReceipt;

/// Trait for parsers that turn a model response into a structured receipt.
pub trait ResponseParser {
    /// Parse a plain-text model response.
    ///
    /// Never fails: missing or malformed fields degrade to defaults and
    /// unrecognized lines are dropped. `raw_ocr` is retained verbatim on
    /// the receipt for audit.
    fn parse(&self, response: &str, raw_ocr: &str) -> ScannedReceipt;
}
