//! Block segmentation and table-driven field extraction.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, MIN_POPULATED_FIELDS};
use crate::models::record::TransactionRecord;

use super::rules::{default_rules, patterns::TRANSACTION_BOUNDARY, FieldRule};
use super::TransactionParser;

/// Result of parsing one document.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Records that passed the length and field-count checks, in block order.
    pub records: Vec<TransactionRecord>,
    /// Number of blocks found after the header.
    pub block_count: usize,
    /// Blocks dropped as too short, noisy, or unextractable.
    pub skipped_blocks: usize,
    /// Absorbed field and block errors.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Split text into transaction blocks.
///
/// A block starts at every line beginning with a serial number followed by a
/// DD-MMM-YYYY date and runs to the next such line. Text before the first
/// boundary is a header and is not returned. Blocks are trimmed.
pub fn split_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = TRANSACTION_BOUNDARY
        .find_iter(text)
        .map(|m| m.start())
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            text[start..end].trim()
        })
        .collect()
}

/// Table-driven extractor for certificate entries.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    rules: Vec<FieldRule>,
    /// Minimum block length in characters.
    min_block_length: usize,
    /// Minimum number of populated fields to keep a record.
    min_populated_fields: usize,
}

impl FieldExtractor {
    /// Create an extractor with the built-in rules and default thresholds.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from configuration.
    ///
    /// The field threshold never drops below [`MIN_POPULATED_FIELDS`].
    pub fn from_config(config: &ExtractionConfig) -> Self {
        if config.min_populated_fields < MIN_POPULATED_FIELDS {
            warn!(
                "min_populated_fields {} raised to {}",
                config.min_populated_fields, MIN_POPULATED_FIELDS
            );
        }
        Self {
            rules: default_rules(),
            min_block_length: config.min_block_length,
            min_populated_fields: config.min_populated_fields.max(MIN_POPULATED_FIELDS),
        }
    }

    /// Set the minimum block length.
    pub fn with_min_block_length(mut self, length: usize) -> Self {
        self.min_block_length = length;
        self
    }

    /// Set the minimum populated field count.
    ///
    /// Unlike [`FieldExtractor::from_config`] this is not clamped, so callers
    /// can relax retention explicitly.
    pub fn with_min_populated_fields(mut self, count: usize) -> Self {
        self.min_populated_fields = count;
        self
    }

    /// Append a rule; it runs after the existing ones.
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Replace the rule table.
    pub fn with_rules(mut self, rules: Vec<FieldRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Extract a record from a single block.
    ///
    /// Field failures are pushed to `warnings` and leave the field unset.
    /// The block fails as a whole only when at least one rule matched and
    /// every matching rule failed.
    pub fn extract_block(
        &self,
        block: &str,
        warnings: &mut Vec<String>,
    ) -> Result<TransactionRecord, ExtractionError> {
        let mut record = TransactionRecord::new();
        let mut matched = 0usize;
        let mut failures = Vec::new();

        for rule in &self.rules {
            let Some(outcome) = rule.apply(block) else {
                continue;
            };
            matched += 1;

            match outcome {
                Ok(Some(value)) => record.set(rule.field, value),
                Ok(None) => debug!("Field {} matched with empty value", rule.field),
                Err(reason) => {
                    let err = ExtractionError::Field {
                        field: rule.field.to_string(),
                        reason,
                    };
                    warn!("{}", err);
                    failures.push(err);
                }
            }
        }

        if matched > 0 && failures.len() == matched {
            let serial = block
                .split_whitespace()
                .next()
                .unwrap_or("?")
                .to_string();
            return Err(ExtractionError::Block {
                serial,
                reason: format!("all {} matching rules failed", matched),
            });
        }

        warnings.extend(failures.into_iter().map(|e| e.to_string()));
        Ok(record)
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionParser for FieldExtractor {
    fn parse(&self, text: &str) -> ExtractionReport {
        let start = Instant::now();
        let mut report = ExtractionReport::default();

        let blocks = split_blocks(text);
        report.block_count = blocks.len();
        debug!("Found {} transaction blocks", blocks.len());

        for block in blocks {
            if block.chars().count() < self.min_block_length {
                debug!("Skipping short block ({} chars)", block.chars().count());
                report.skipped_blocks += 1;
                continue;
            }

            match self.extract_block(block, &mut report.warnings) {
                Ok(record) if record.populated_fields() >= self.min_populated_fields => {
                    report.records.push(record);
                }
                Ok(record) => {
                    debug!(
                        "Dropping block with {} populated fields",
                        record.populated_fields()
                    );
                    report.skipped_blocks += 1;
                }
                Err(e) => {
                    warn!("Skipping block: {}", e);
                    report.warnings.push(e.to_string());
                    report.skipped_blocks += 1;
                }
            }
        }

        report.processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted {} records from {} blocks",
            report.records.len(),
            report.block_count
        );

        report
    }
}
