//! Value-level receipt editing.
//!
//! Users correct parsed receipts before committing them as expenses. Every
//! edit returns a new receipt value with the total recomputed as the exact
//! sum of item amounts; nothing shared is mutated. Out-of-range indices and
//! unparseable amount text are silent no-ops: degraded input is an expected
//! state here, not a programming error.

use super::amount::parse_amount;
use crate::models::receipt::ScannedReceipt;

/// A partial edit of one line item. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemEdit {
    name: Option<String>,
    amount_text: Option<String>,
    category: Option<String>,
}

impl ItemEdit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the item's display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the item's amount with a user-typed decimal string.
    ///
    /// The text goes through [`parse_amount`]; if it fails to parse, the
    /// existing amount stays.
    pub fn with_amount_text(mut self, text: impl Into<String>) -> Self {
        self.amount_text = Some(text.into());
        self
    }

    /// Replace the item's category label.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl ScannedReceipt {
    /// Apply an edit to the item at `index` and recompute the total.
    ///
    /// Returns the receipt unchanged when `index` is out of range.
    pub fn update_item(&self, index: usize, edit: &ItemEdit) -> ScannedReceipt {
        let mut receipt = self.clone();
        let Some(item) = receipt.items.get_mut(index) else {
            return receipt;
        };

        if let Some(name) = &edit.name {
            item.translated_name = Some(name.clone());
        }
        if let Some(text) = &edit.amount_text {
            if let Some(amount) = parse_amount(text) {
                item.amount = amount;
            }
        }
        if let Some(category) = &edit.category {
            item.category = Some(category.clone());
        }

        receipt.total = receipt.items_total();
        receipt
    }

    /// Remove the item at `index` and recompute the total.
    ///
    /// Returns the receipt unchanged when `index` is out of range.
    pub fn remove_item(&self, index: usize) -> ScannedReceipt {
        let mut receipt = self.clone();
        if index >= receipt.items.len() {
            return receipt;
        }

        receipt.items.remove(index);
        receipt.total = receipt.items_total();
        receipt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::receipt::ReceiptLineItem;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn receipt() -> ScannedReceipt {
        let items = vec![
            ReceiptLineItem {
                name: "White Bread".to_string(),
                translated_name: Some("White Bread".to_string()),
                amount: dec("1.20"),
                quantity: Some(1),
                category: Some("Food & Drink".to_string()),
            },
            ReceiptLineItem {
                name: "Fresh Milk 1L".to_string(),
                translated_name: Some("Fresh Milk 1L".to_string()),
                amount: dec("2.30"),
                quantity: Some(2),
                category: Some("Food & Drink".to_string()),
            },
        ];

        ScannedReceipt {
            store_name: Some("Lidl".to_string()),
            date: None,
            items,
            // Deliberately off: the parser trusts the stated total.
            total: dec("15.50"),
            currency: "EUR".to_string(),
            raw_text: String::new(),
            translated_text: Some("Lidl".to_string()),
        }
    }

    #[test]
    fn test_update_amount_recomputes_total() {
        let edited = receipt().update_item(0, &ItemEdit::new().with_amount_text("2.00"));

        assert_eq!(edited.items[0].amount, dec("2.00"));
        assert_eq!(edited.total, dec("4.30"));
        assert_eq!(edited.total, edited.items_total());
    }

    #[test]
    fn test_update_accepts_comma_decimal() {
        let edited = receipt().update_item(1, &ItemEdit::new().with_amount_text("3,10"));

        assert_eq!(edited.items[1].amount, dec("3.10"));
        assert_eq!(edited.total, dec("4.30"));
    }

    #[test]
    fn test_update_name_and_category() {
        let edit = ItemEdit::new().with_name("Bread").with_category("Bakery");
        let edited = receipt().update_item(0, &edit);

        assert_eq!(edited.items[0].translated_name.as_deref(), Some("Bread"));
        // The original extracted name is preserved.
        assert_eq!(edited.items[0].name, "White Bread");
        assert_eq!(edited.items[0].category.as_deref(), Some("Bakery"));
    }

    #[test]
    fn test_unparseable_amount_leaves_item_untouched() {
        let before = receipt();
        let edited = before.update_item(0, &ItemEdit::new().with_amount_text("abc"));

        assert_eq!(edited.items[0].amount, dec("1.20"));
        // Total is still reconciled with the item sum.
        assert_eq!(edited.total, dec("3.50"));
    }

    #[test]
    fn test_update_out_of_range_is_noop() {
        let before = receipt();
        let edited = before.update_item(5, &ItemEdit::new().with_name("x"));

        assert_eq!(edited.items.len(), 2);
        assert_eq!(edited.total, before.total);
    }

    #[test]
    fn test_remove_item_recomputes_total() {
        let edited = receipt().remove_item(0);

        assert_eq!(edited.items.len(), 1);
        assert_eq!(edited.items[0].name, "Fresh Milk 1L");
        assert_eq!(edited.total, dec("2.30"));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let before = receipt();
        let edited = before.remove_item(2);

        assert_eq!(edited.items.len(), 2);
        assert_eq!(edited.total, before.total);
    }

    #[test]
    fn test_edits_do_not_mutate_the_original() {
        let before = receipt();
        let _ = before.update_item(0, &ItemEdit::new().with_amount_text("9.99"));
        let _ = before.remove_item(1);

        assert_eq!(before.items.len(), 2);
        assert_eq!(before.items[0].amount, dec("1.20"));
        assert_eq!(before.total, dec("15.50"));
    }
}
