//! Core library for Tamil/English encumbrance certificate processing.
//!
//! This crate provides:
//! - Transaction block segmentation and table-driven field extraction
//! - Tamil script detection and party name normalization
//! - Tamil to English translation (remote service with dictionary fallback)
//! - A document pipeline combining the above, plus filtering and a storage boundary
//! - PDF text extraction (feature `pdf`)

pub mod error;
pub mod extraction;
pub mod filter;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod pipeline;
pub mod store;
pub mod text;
pub mod translation;

pub use error::{EcxError, Result};
pub use extraction::rules::parse_registration_date;
pub use extraction::{FieldExtractor, TransactionParser};
pub use filter::RecordFilter;
pub use models::config::EcxConfig;
pub use models::record::{
    Field, FieldTranslation, FieldValue, PartyField, ProcessedDocument, TransactionRecord,
};
#[cfg(feature = "pdf")]
pub use pdf::{PdfProcessor, PdfTextSource};
pub use pipeline::DocumentPipeline;
pub use store::{MemorySink, RecordSink};
pub use text::{contains_tamil, normalize_name};
pub use translation::{
    Dictionary, GoogleTranslateClient, RemoteTranslator, TranslationMethod, TranslationResult,
    Translator,
};
