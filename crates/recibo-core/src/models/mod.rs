//! Data models for receipts, expense drafts, and configuration.

pub mod config;
pub mod expense;
pub mod receipt;

pub use config::ReciboConfig;
pub use expense::ExpenseDraft;
pub use receipt::{ReceiptLineItem, ScannedReceipt};
