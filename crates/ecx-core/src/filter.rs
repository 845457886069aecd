//! Post-translation record filtering.

use serde::{Deserialize, Serialize};

use crate::models::record::{ProcessedDocument, TransactionRecord};

/// Optional criteria applied to translated records.
///
/// Names match by case-insensitive substring, numbers by exact equality.
/// A record missing the field in question is never rejected by that criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordFilter {
    pub buyer_name: Option<String>,
    pub seller_name: Option<String>,
    pub house_number: Option<String>,
    pub survey_number: Option<String>,
    pub document_number: Option<String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check a single record.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        contains_ignore_case(record.buyer.as_deref(), self.buyer_name.as_deref())
            && contains_ignore_case(record.seller.as_deref(), self.seller_name.as_deref())
            && equals(record.house_no.as_deref(), self.house_number.as_deref())
            && equals(record.survey_no.as_deref(), self.survey_number.as_deref())
            && equals(record.document_no.as_deref(), self.document_number.as_deref())
    }

    /// Keep matching records, preserving order.
    pub fn apply(&self, records: Vec<TransactionRecord>) -> Vec<TransactionRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }

    /// Filter a processed document in place.
    ///
    /// Translations of dropped records are removed and the remaining
    /// `record_index` values are renumbered to the filtered list.
    pub fn apply_to_document(&self, document: &mut ProcessedDocument) {
        if self.is_empty() {
            return;
        }

        let mut new_index = Vec::with_capacity(document.records.len());
        let mut kept = 0;
        for record in &document.records {
            if self.matches(record) {
                new_index.push(Some(kept));
                kept += 1;
            } else {
                new_index.push(None);
            }
        }

        let records = std::mem::take(&mut document.records);
        document.records = records
            .into_iter()
            .filter(|r| self.matches(r))
            .collect();

        document.translations.retain_mut(|t| {
            match new_index.get(t.record_index).copied().flatten() {
                Some(index) => {
                    t.record_index = index;
                    true
                }
                None => false,
            }
        });
    }
}

fn contains_ignore_case(value: Option<&str>, wanted: Option<&str>) -> bool {
    match (value, wanted.filter(|w| !w.is_empty())) {
        (Some(value), Some(wanted)) => value.to_lowercase().contains(&wanted.to_lowercase()),
        _ => true,
    }
}

fn equals(value: Option<&str>, wanted: Option<&str>) -> bool {
    match (value, wanted.filter(|w| !w.is_empty())) {
        (Some(value), Some(wanted)) => value == wanted,
        _ => true,
    }
}
