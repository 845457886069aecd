//! Error types for the ecx-core library.

use thiserror::Error;

/// Main error type for the ecx library.
#[derive(Error, Debug)]
pub enum EcxError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field or block extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Remote translation error.
    #[error("translation error: {0}")]
    Translation(#[from] TranslationError),

    /// The document as a whole could not be processed.
    #[error("document processing failed: {0}")]
    Document(String),

    /// Record storage error reported by a sink.
    #[error("store error: {0}")]
    Store(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while extracting fields from a transaction block.
///
/// These are absorbed by the extractor and surface only as warnings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A single field rule matched but its value could not be used.
    #[error("failed to extract {field}: {reason}")]
    Field { field: String, reason: String },

    /// No record could be produced from the block.
    #[error("block {serial} could not be extracted: {reason}")]
    Block { serial: String, reason: String },
}

/// Errors from the remote translation collaborator.
///
/// The translator falls back to the dictionary on every variant.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// No API key configured for the remote service.
    #[error("translation API key not provided")]
    MissingCredentials,

    /// The remote call did not finish within the configured timeout.
    #[error("translation request timed out after {0}ms")]
    Timeout(u64),

    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not contain a translation.
    #[error("malformed translation response: {0}")]
    MalformedResponse(String),
}

/// Result type for the ecx library.
pub type Result<T> = std::result::Result<T, EcxError>;
