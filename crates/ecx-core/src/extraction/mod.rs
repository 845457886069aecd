//! Transaction extraction from encumbrance certificate text.

mod parser;
pub mod rules;

pub use parser::{split_blocks, ExtractionReport, FieldExtractor};
pub use rules::{default_rules, FieldRule};

use crate::models::record::TransactionRecord;

/// Trait for turning raw certificate text into transaction records.
pub trait TransactionParser {
    /// Parse a document, reporting absorbed problems alongside the records.
    fn parse(&self, text: &str) -> ExtractionReport;

    /// Parse a document and keep only the records.
    fn parse_document(&self, text: &str) -> Vec<TransactionRecord> {
        self.parse(text).records
    }
}
