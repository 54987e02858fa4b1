//! Projection of finalized receipts into expense drafts.
//!
//! Once the user is done editing, each line item becomes exactly one
//! expense draft. Committing hands drafts to the expense store one at a
//! time and keeps going past per-item failures, so a flaky backend yields
//! partial success rather than an all-or-nothing abort.

use chrono::Local;
use tracing::{info, warn};

use crate::error::CommitError;
use crate::models::config::ExpenseConfig;
use crate::models::expense::ExpenseDraft;
use crate::models::receipt::ScannedReceipt;

/// Expense persistence collaborator.
#[allow(async_fn_in_trait)]
pub trait ExpenseSink {
    /// Create one expense record.
    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<(), CommitError>;
}

/// Map each receipt line item to one expense draft.
///
/// `unit` is fixed at 1 and `unit_price` equals the item amount: the store
/// must treat the amount as final and never multiply again. The store name
/// becomes the expense location.
pub fn project_receipt(receipt: &ScannedReceipt, config: &ExpenseConfig) -> Vec<ExpenseDraft> {
    let expense_date = receipt.date.unwrap_or_else(|| Local::now().date_naive());

    receipt
        .items
        .iter()
        .map(|item| ExpenseDraft {
            item: item.display_name().to_string(),
            amount: item.amount,
            currency: receipt.currency.clone(),
            expense_date,
            category: item.category.clone(),
            location: receipt.store_name.clone(),
            unit: 1,
            unit_price: item.amount,
            payment_method: config.payment_method.clone(),
        })
        .collect()
}

/// Outcome of committing a receipt to the expense store.
#[derive(Debug, Clone, Default)]
pub struct CommitOutcome {
    /// Drafts that were stored successfully.
    pub created: Vec<ExpenseDraft>,
    /// Item name and error text for each draft that failed.
    pub failures: Vec<(String, String)>,
}

impl CommitOutcome {
    /// True when every draft was stored.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Commit a finalized receipt, one expense per line item.
pub async fn commit_receipt<S: ExpenseSink>(
    sink: &S,
    receipt: &ScannedReceipt,
    config: &ExpenseConfig,
) -> CommitOutcome {
    let drafts = project_receipt(receipt, config);
    let mut outcome = CommitOutcome::default();

    for draft in drafts {
        match sink.create_expense(&draft).await {
            Ok(()) => outcome.created.push(draft),
            Err(err) => {
                warn!("failed to create expense for {}: {}", draft.item, err);
                outcome.failures.push((draft.item, err.to_string()));
            }
        }
    }

    info!(
        "created {} of {} expenses from receipt",
        outcome.created.len(),
        receipt.items.len()
    );

    outcome
}
