//! Receipt data models produced by the response parser.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single parsed receipt.
///
/// Created once by the response parser. Edits replace the whole value
/// rather than mutating shared items, so previous values stay readable
/// while an edit is computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedReceipt {
    /// Store name as extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,

    /// Purchase date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Line items in parse order. Order is meaningful: edits address items
    /// by index.
    pub items: Vec<ReceiptLineItem>,

    /// Receipt total. The parser trusts the TOTAL line verbatim; every edit
    /// recomputes this as the exact sum of item amounts.
    pub total: Decimal,

    /// ISO-4217-style currency code.
    pub currency: String,

    /// Original OCR text, kept for audit.
    pub raw_text: String,

    /// Display name for the store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
}

impl ScannedReceipt {
    /// Exact sum of all item amounts.
    pub fn items_total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc + item.amount)
    }
}

/// One purchased item on a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLineItem {
    /// Item name as extracted.
    pub name: String,

    /// Display override, usually the model's translation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_name: Option<String>,

    /// Line total with any discount already folded in upstream. This is
    /// never price times quantity.
    pub amount: Decimal,

    /// Informational quantity; does not participate in totals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,

    /// Free-form category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ReceiptLineItem {
    /// Name to display: the translated name when available.
    pub fn display_name(&self) -> &str {
        self.translated_name.as_deref().unwrap_or(&self.name)
    }
}
