//! JSON-lines record store.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use ecx_core::{EcxError, RecordSink, TransactionRecord};

/// Appends one JSON object per record to a file.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord<'a> {
    document_id: &'a str,
    stored_at: DateTime<Utc>,
    #[serde(flatten)]
    record: TransactionRecord,
}

impl JsonlSink {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RecordSink for JsonlSink {
    fn store(&mut self, document_id: &str, records: &[TransactionRecord]) -> ecx_core::Result<usize> {
        let stored_at = Utc::now();

        for record in records {
            let mut record = record.clone();
            record.transaction_date = record.transaction_date();

            let line = serde_json::to_string(&StoredRecord {
                document_id,
                stored_at,
                record,
            })
            .map_err(|e| EcxError::Store(e.to_string()))?;
            writeln!(self.writer, "{}", line)?;
        }

        self.writer.flush()?;
        debug!("Stored {} records for {}", records.len(), document_id);
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_tagged_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");

        let record = TransactionRecord {
            serial_no: Some("1".to_string()),
            date: Some("06-Feb-2013".to_string()),
            ..Default::default()
        };

        let mut sink = JsonlSink::open(&path).unwrap();
        assert_eq!(sink.store("ec-1.pdf", &[record.clone(), record]).unwrap(), 2);
        drop(sink);

        let mut sink = JsonlSink::open(&path).unwrap();
        sink.store("ec-2.pdf", &[]).unwrap();
        drop(sink);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["documentId"], "ec-1.pdf");
        assert_eq!(lines[0]["transactionDate"], "2013-02-06");
        assert_eq!(lines[1]["serialNo"], "1");
    }
}
