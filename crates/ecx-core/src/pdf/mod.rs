//! PDF text source.
//!
//! Produces the raw document text the pipeline consumes. Scanned
//! certificates without a text layer are reported as empty rather than
//! OCR'd.

mod extractor;

pub use extractor::PdfTextSource;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text sources.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}
