//! Core library for receipt scanning.
//!
//! This crate provides:
//! - Locale-tolerant decimal normalization for amounts typed by users or
//!   emitted by a language model
//! - A parser for the fixed plain-text protocol the model returns
//! - Value-level receipt editing that keeps totals consistent
//! - Projection of finalized receipts into expense drafts

pub mod error;
pub mod expense;
pub mod models;
pub mod receipt;
pub mod scan;

pub use error::{CommitError, ScanError};
pub use expense::{CommitOutcome, ExpenseSink, commit_receipt, project_receipt};
pub use models::config::ReciboConfig;
pub use models::expense::ExpenseDraft;
pub use models::receipt::{ReceiptLineItem, ScannedReceipt};
pub use receipt::{ItemEdit, ReceiptParser, ResponseParser, parse_amount};
pub use scan::{ReceiptModel, ReceiptScanner, TextRecognizer, build_prompt};
