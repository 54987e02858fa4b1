//! Parser for the fixed plain-text receipt protocol.
//!
//! The generative model is prompted to answer in a line-oriented format:
//!
//! ```text
//! STORE: <name>
//! DATE: <YYYY-MM-DD>
//! CURRENCY: <code>
//! TOTAL: <decimal>
//! ITEMS_START
//! <name>|<price>|<quantity>
//! ITEMS_END
//! ```
//!
//! Models drift: extra commentary lines, inconsistent spacing, missing
//! fields. The parser therefore never fails - it produces the best-effort
//! structured value and drops anything it cannot place.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use super::ResponseParser;
use super::amount::parse_amount;
use crate::models::config::ParsingConfig;
use crate::models::receipt::{ReceiptLineItem, ScannedReceipt};

/// Marker line opening the item section.
const ITEMS_START: &str = "ITEMS_START";
/// Marker line closing the item section.
const ITEMS_END: &str = "ITEMS_END";

/// Best-effort parser for the plain-text response protocol.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    /// Currency used when the response has no CURRENCY line.
    default_currency: String,
    /// Placeholder category assigned to every parsed item.
    default_category: String,
    /// Quantity used when the quantity field fails to parse.
    default_quantity: i64,
}

impl ReceiptParser {
    /// Create a parser with the stock defaults (EUR, "Food & Drink", 1).
    pub fn new() -> Self {
        Self::from_config(&ParsingConfig::default())
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ParsingConfig) -> Self {
        Self {
            default_currency: config.default_currency.clone(),
            default_category: config.default_category.clone(),
            default_quantity: config.default_quantity,
        }
    }

    /// Set the fallback currency.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    /// Set the placeholder category for parsed items.
    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    /// Parse one `name|price|quantity` line from the item section.
    ///
    /// Lines with any other field count are not items and are dropped.
    fn parse_item_line(&self, line: &str) -> Option<ReceiptLineItem> {
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() != 3 {
            return None;
        }

        let name = parts[0].trim().to_string();
        let amount = parse_amount(parts[1]).unwrap_or(Decimal::ZERO);
        let quantity = parts[2]
            .trim()
            .parse::<i64>()
            .unwrap_or(self.default_quantity);

        debug!("parsed item: {} - {} x{}", name, amount, quantity);

        Some(ReceiptLineItem {
            // The prompt asks the model to translate names, so the parsed
            // name doubles as the display name.
            translated_name: Some(name.clone()),
            name,
            amount,
            quantity: Some(quantity),
            category: Some(self.default_category.clone()),
        })
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser for ReceiptParser {
    fn parse(&self, response: &str, raw_ocr: &str) -> ScannedReceipt {
        let mut store_name: Option<String> = None;
        let mut date_string: Option<String> = None;
        let mut currency = self.default_currency.clone();
        let mut total = Decimal::ZERO;
        let mut items: Vec<ReceiptLineItem> = Vec::new();
        let mut in_items = false;

        for line in response.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if let Some(rest) = line.strip_prefix("STORE:") {
                store_name = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("DATE:") {
                date_string = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("CURRENCY:") {
                currency = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("TOTAL:") {
                // Same tolerant parse as item prices; zero when unusable.
                // The stated total is trusted verbatim here - edits are
                // what reconcile it with the item sum.
                total = parse_amount(rest).unwrap_or(Decimal::ZERO);
            } else if line == ITEMS_START {
                in_items = true;
            } else if line == ITEMS_END {
                in_items = false;
            } else if in_items {
                if let Some(item) = self.parse_item_line(line) {
                    items.push(item);
                }
            }
        }

        let date = date_string
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Local::now().date_naive());

        debug!(
            "parsed receipt: store={:?}, {} items, total {} {}",
            store_name,
            items.len(),
            total,
            currency
        );

        ScannedReceipt {
            translated_text: store_name.clone(),
            store_name,
            date: Some(date),
            items,
            total,
            currency,
            raw_text: raw_ocr.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const SAMPLE: &str = "STORE: Lidl\n\
                          DATE: 2025-01-10\n\
                          CURRENCY: EUR\n\
                          TOTAL: 15.50\n\
                          ITEMS_START\n\
                          White Bread|1.20|1\n\
                          Fresh Milk 1L|2.30|2\n\
                          ITEMS_END";

    #[test]
    fn test_parse_well_formed_response() {
        let parser = ReceiptParser::new();
        let receipt = parser.parse(SAMPLE, "raw ocr dump");

        assert_eq!(receipt.store_name.as_deref(), Some("Lidl"));
        assert_eq!(receipt.translated_text.as_deref(), Some("Lidl"));
        assert_eq!(receipt.date, NaiveDate::from_ymd_opt(2025, 1, 10));
        assert_eq!(receipt.currency, "EUR");
        assert_eq!(receipt.total, dec("15.50"));
        assert_eq!(receipt.raw_text, "raw ocr dump");

        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[0].name, "White Bread");
        assert_eq!(receipt.items[0].translated_name.as_deref(), Some("White Bread"));
        assert_eq!(receipt.items[0].amount, dec("1.20"));
        assert_eq!(receipt.items[0].quantity, Some(1));
        assert_eq!(receipt.items[0].category.as_deref(), Some("Food & Drink"));
        assert_eq!(receipt.items[1].name, "Fresh Milk 1L");
        assert_eq!(receipt.items[1].amount, dec("2.30"));
        assert_eq!(receipt.items[1].quantity, Some(2));
    }

    #[test]
    fn test_wrong_field_count_is_skipped() {
        let response = "ITEMS_START\n\
                        Tomatoes|3.50\n\
                        Cheese|4.00|1|extra\n\
                        Milk|2.30|2\n\
                        ITEMS_END";

        let parser = ReceiptParser::new();
        let receipt = parser.parse(response, "");

        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].name, "Milk");
    }

    #[test]
    fn test_item_lines_outside_section_are_ignored() {
        let response = "Bread|1.20|1\n\
                        ITEMS_START\n\
                        Milk|2.30|1\n\
                        ITEMS_END\n\
                        Butter|3.00|1";

        let parser = ReceiptParser::new();
        let receipt = parser.parse(response, "");

        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].name, "Milk");
    }

    #[test]
    fn test_commentary_and_blank_lines_are_tolerated() {
        let response = "Here is the extracted receipt:\n\
                        \n\
                        STORE:  Kaufland \n\
                        TOTAL: 3,50\n\
                        ITEMS_START\n\
                        Yogurt|3,50|1\n\
                        ITEMS_END\n\
                        Let me know if you need anything else!";

        let parser = ReceiptParser::new();
        let receipt = parser.parse(response, "");

        assert_eq!(receipt.store_name.as_deref(), Some("Kaufland"));
        assert_eq!(receipt.total, dec("3.50"));
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].amount, dec("3.50"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parser = ReceiptParser::new();
        let receipt = parser.parse("ITEMS_START\nMilk|2.30|1\nITEMS_END", "");

        assert_eq!(receipt.store_name, None);
        assert_eq!(receipt.currency, "EUR");
        assert_eq!(receipt.total, Decimal::ZERO);
        // Absent DATE falls back to today.
        assert_eq!(receipt.date, Some(Local::now().date_naive()));
    }

    #[test]
    fn test_bad_date_falls_back_to_today() {
        let parser = ReceiptParser::new();
        let receipt = parser.parse("DATE: 10.01.2025", "");
        assert_eq!(receipt.date, Some(Local::now().date_naive()));
    }

    #[test]
    fn test_unparseable_price_and_quantity_default() {
        let parser = ReceiptParser::new();
        let receipt = parser.parse("ITEMS_START\nMystery|n/a|many\nITEMS_END", "");

        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].amount, Decimal::ZERO);
        assert_eq!(receipt.items[0].quantity, Some(1));
    }

    #[test]
    fn test_parser_total_is_trusted_verbatim() {
        // The parser does not reconcile TOTAL with the item sum.
        let response = "TOTAL: 99.99\n\
                        ITEMS_START\n\
                        Milk|2.30|1\n\
                        ITEMS_END";

        let parser = ReceiptParser::new();
        let receipt = parser.parse(response, "");

        assert_eq!(receipt.total, dec("99.99"));
        assert_eq!(receipt.items_total(), dec("2.30"));
    }

    #[test]
    fn test_configured_defaults() {
        let parser = ReceiptParser::new()
            .with_default_currency("BGN")
            .with_default_category("Groceries");
        let receipt = parser.parse("ITEMS_START\nMilk|2.30|1\nITEMS_END", "");

        assert_eq!(receipt.currency, "BGN");
        assert_eq!(receipt.items[0].category.as_deref(), Some("Groceries"));
    }

    #[test]
    fn test_currency_line_overrides_default() {
        let parser = ReceiptParser::new();
        let receipt = parser.parse("CURRENCY: USD", "");
        assert_eq!(receipt.currency, "USD");
    }
}
