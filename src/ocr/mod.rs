//! OCR engine interface.

use thiserror::Error;

use crate::prelude::*;

pub mod documentai;

/// The only document type we submit for OCR.
pub static PDF_MIME_TYPE: &str = "application/pdf";

/// An OCR call failed. Fatal to the whole batch: there is no per-file retry
/// and no continuation past a failed call.
#[derive(Debug, Error)]
#[error("OCR request failed: {message}")]
pub struct OcrError {
    /// Human-readable description of what went wrong.
    pub message: String,
}

/// The result of OCRing one document.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrDocument {
    /// The full extracted text of the document.
    pub text: String,

    /// One metadata record per page, in page order, each rendered as a
    /// single line of JSON with embedded image data already stripped.
    pub pages: Vec<String>,
}

/// Interface to an OCR service.
#[async_trait]
pub trait OcrEngine: Send + Sync + 'static {
    /// Process one document's raw bytes and extract its text.
    async fn process(&self, content: Vec<u8>) -> Result<OcrDocument>;
}
