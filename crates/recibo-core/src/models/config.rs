//! Configuration for parsing defaults and expense projection.

use serde::{Deserialize, Serialize};

/// Main configuration for the recibo pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReciboConfig {
    /// Response parsing defaults.
    pub parsing: ParsingConfig,

    /// Expense projection defaults.
    pub expenses: ExpenseConfig,
}

/// Defaults applied while parsing a model response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Currency assumed when the response has no CURRENCY line.
    pub default_currency: String,

    /// Category assigned to parsed items until the user picks one.
    pub default_category: String,

    /// Quantity assumed when the quantity field fails to parse.
    pub default_quantity: i64,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            default_currency: "EUR".to_string(),
            default_category: "Food & Drink".to_string(),
            default_quantity: 1,
        }
    }
}

/// Defaults applied when projecting a receipt into expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseConfig {
    /// Payment method recorded on expenses created from receipts.
    pub payment_method: String,
}

impl Default for ExpenseConfig {
    fn default() -> Self {
        Self {
            payment_method: "Food Voucher".to_string(),
        }
    }
}

impl ReciboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
