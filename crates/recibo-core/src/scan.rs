//! Scan pipeline wiring the external OCR and model collaborators to the
//! response parser.
//!
//! The pipeline is strictly serial per scan: one text recognition call, one
//! model call, one parse. There is no retry, batching, or streaming; a
//! failure at either collaborator aborts the scan and surfaces to the
//! caller.

use tracing::{debug, info};

use crate::error::ScanError;
use crate::models::receipt::ScannedReceipt;
use crate::receipt::{ReceiptParser, ResponseParser};

/// Text recognition collaborator (OCR).
#[allow(async_fn_in_trait)]
pub trait TextRecognizer {
    /// Recognize text in an image, returned as newline-joined lines in
    /// reading order.
    async fn recognize_text(&self, image: &[u8]) -> Result<String, ScanError>;
}

/// Generative-model collaborator that answers the extraction prompt.
#[allow(async_fn_in_trait)]
pub trait ReceiptModel {
    /// Generate a plain-text completion for the prompt.
    async fn generate(&self, prompt: &str) -> Result<String, ScanError>;
}

/// Build the extraction prompt for a raw OCR dump.
///
/// The model is instructed to translate item names and fold discounts into
/// item prices, so downstream code recomputes neither. The field and
/// section markers here are the exact strings the parser dispatches on.
pub fn build_prompt(raw_ocr: &str) -> String {
    format!(
        "Extract information from this receipt OCR and translate item names to English. \
         If there is a discount, apply it directly to the item price before listing.\n\
         \n\
         Return the data in this EXACT plain text format (one field per line):\n\
         \n\
         STORE: [store name]\n\
         DATE: [YYYY-MM-DD]\n\
         CURRENCY: [currency code, e.g., EUR, BGN, USD]\n\
         TOTAL: [total amount as decimal number]\n\
         ITEMS_START\n\
         [Item name in English]|[price as decimal]|[quantity as integer]\n\
         ITEMS_END\n\
         \n\
         === RAW OCR TEXT ===\n\
         {raw_ocr}\n\
         === END RAW TEXT ==="
    )
}

/// Receipt scanner combining the two collaborators with a parser.
pub struct ReceiptScanner<R, M> {
    recognizer: R,
    model: M,
    parser: ReceiptParser,
}

impl<R: TextRecognizer, M: ReceiptModel> ReceiptScanner<R, M> {
    /// Create a scanner with the default parser settings.
    pub fn new(recognizer: R, model: M) -> Self {
        Self {
            recognizer,
            model,
            parser: ReceiptParser::new(),
        }
    }

    /// Replace the parser, e.g. one built from configuration.
    pub fn with_parser(mut self, parser: ReceiptParser) -> Self {
        self.parser = parser;
        self
    }

    /// Scan one receipt image into a structured receipt.
    pub async fn scan(&self, image: &[u8]) -> Result<ScannedReceipt, ScanError> {
        let raw_text = self.recognizer.recognize_text(image).await?;
        debug!("text recognition produced {} characters", raw_text.len());

        let response = self.model.generate(&build_prompt(&raw_text)).await?;
        if response.trim().is_empty() {
            return Err(ScanError::EmptyResponse);
        }

        let receipt = self.parser.parse(&response, &raw_text);
        info!(
            "scanned receipt from {} with {} items, total {} {}",
            receipt.store_name.as_deref().unwrap_or("unknown store"),
            receipt.items.len(),
            receipt.total,
            receipt.currency
        );

        Ok(receipt)
    }
}
