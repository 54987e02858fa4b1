//! Error types for the recibo-core library.
//!
//! Only the collaborator boundaries fail with errors. Parsing is total by
//! contract: malformed numeric text or protocol lines degrade to defaults
//! instead of propagating.

use thiserror::Error;

/// Errors from the scan pipeline collaborators.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Ocr(String),

    /// The generative model call failed.
    #[error("model error: {0}")]
    Model(String),

    /// The model returned an empty response.
    #[error("model returned an empty response")]
    EmptyResponse,
}

/// Errors while committing a receipt to the expense store.
#[derive(Error, Debug)]
pub enum CommitError {
    /// The backing store rejected the expense.
    #[error("failed to create expense: {0}")]
    Store(String),
}
