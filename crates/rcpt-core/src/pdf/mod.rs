//! Document text sources.
//!
//! OCR happens upstream; these sources only read text that is already
//! present, either in a PDF text layer or in a plain-text sidecar.

mod extractor;

pub use extractor::{validate_pdf, PdfExtractor, PdfValidation};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Something that turns a document's bytes into raw text.
pub trait TextSource {
    /// Extract all text from the document.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the loaded PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Reads bytes as UTF-8 text produced by an external OCR engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_source_is_lossy() {
        let text = PlainTextSource.extract_text(b"TARGET\n\xffTotal 3.00").unwrap();
        assert_eq!(text, "TARGET\n\u{fffd}Total 3.00");
    }
}
