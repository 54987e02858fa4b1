//! Expense draft records handed to the expense store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One expense to create from a receipt line item.
///
/// The expense store treats `amount` as the final total for the record:
/// `unit` is always 1 and `unit_price` equals `amount`, so consumers must
/// never multiply them back together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Display name of the purchased item.
    pub item: String,

    /// Final amount for this expense.
    pub amount: Decimal,

    /// Currency code inherited from the receipt.
    pub currency: String,

    /// Date the expense is recorded under.
    pub expense_date: NaiveDate,

    /// Category carried over from the line item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Store name, recorded as the expense location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Always 1 for receipt-derived expenses.
    pub unit: i64,

    /// Equals `amount`.
    pub unit_price: Decimal,

    /// Payment method recorded on the expense.
    pub payment_method: String,
}
