//! Persistence boundary.
//!
//! The pipeline never stores anything itself; callers hand its output to a
//! [`RecordSink`].

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::record::TransactionRecord;

/// Destination for processed records.
pub trait RecordSink {
    /// Store the ordered records of one document. Returns the number stored.
    fn store(&mut self, document_id: &str, records: &[TransactionRecord]) -> Result<usize>;
}

/// In-memory sink keyed by document id.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: BTreeMap<String, Vec<TransactionRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records stored for a document, in the order they were stored.
    pub fn records(&self, document_id: &str) -> Vec<TransactionRecord> {
        self.documents.get(document_id).cloned().unwrap_or_default()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}

impl RecordSink for MemorySink {
    fn store(&mut self, document_id: &str, records: &[TransactionRecord]) -> Result<usize> {
        self.documents
            .entry(document_id.to_string())
            .or_default()
            .extend_from_slice(records);
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_appends_in_order() {
        let mut sink = MemorySink::new();
        let first = TransactionRecord {
            serial_no: Some("1".to_string()),
            ..Default::default()
        };
        let second = TransactionRecord {
            serial_no: Some("2".to_string()),
            ..Default::default()
        };

        assert_eq!(sink.store("ec-1.pdf", &[first.clone()]).unwrap(), 1);
        assert_eq!(sink.store("ec-1.pdf", &[second.clone()]).unwrap(), 1);
        assert_eq!(sink.store("ec-2.pdf", &[]).unwrap(), 0);

        assert_eq!(sink.records("ec-1.pdf"), vec![first, second]);
        assert_eq!(sink.document_count(), 2);
        assert!(sink.records("missing").is_empty());
    }
}
