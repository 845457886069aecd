//! Document pipeline: extraction followed by party-name translation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{EcxError, Result};
use crate::extraction::{FieldExtractor, TransactionParser};
use crate::models::config::EcxConfig;
use crate::models::record::{FieldTranslation, PartyField, ProcessedDocument};
use crate::text::contains_tamil;
use crate::translation::{Dictionary, Translator};

/// Runs extraction and translation over a whole document.
///
/// Translations run one at a time in record order, buyer before seller.
/// Consecutive remote calls are spaced by at least `inter_call_delay`.
#[derive(Debug, Clone)]
pub struct DocumentPipeline {
    extractor: FieldExtractor,
    translator: Translator,
    inter_call_delay: Duration,
}

impl DocumentPipeline {
    pub fn new(extractor: FieldExtractor, translator: Translator) -> Self {
        Self {
            extractor,
            translator,
            inter_call_delay: Duration::ZERO,
        }
    }

    /// Build a pipeline from configuration and a dictionary.
    pub fn from_config(config: &EcxConfig, dictionary: Arc<Dictionary>) -> Self {
        Self::new(
            FieldExtractor::from_config(&config.extraction),
            Translator::from_config(&config.translation, dictionary),
        )
        .with_inter_call_delay(Duration::from_millis(config.translation.inter_call_delay_ms))
    }

    /// Set the minimum delay between consecutive remote translation calls.
    pub fn with_inter_call_delay(mut self, delay: Duration) -> Self {
        self.inter_call_delay = delay;
        self
    }

    pub fn extractor(&self) -> &FieldExtractor {
        &self.extractor
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Process a whole document.
    pub async fn process(&self, raw_text: &str) -> Result<ProcessedDocument> {
        let never = AtomicBool::new(false);
        self.process_with_cancel(raw_text, &never).await
    }

    /// Process a document, stopping early once `cancel` is set.
    ///
    /// The flag is checked before each record is translated. On cancellation
    /// the records completed so far are returned as they are, with
    /// `cancelled` set.
    pub async fn process_with_cancel(
        &self,
        raw_text: &str,
        cancel: &AtomicBool,
    ) -> Result<ProcessedDocument> {
        if raw_text.trim().is_empty() {
            return Err(EcxError::Document("document text is empty".to_string()));
        }

        let report = self.extractor.parse(raw_text);
        let mut output = ProcessedDocument {
            warnings: report.warnings,
            ..Default::default()
        };

        let total = report.records.len();
        let mut last_remote_call: Option<Instant> = None;

        for (index, mut record) in report.records.into_iter().enumerate() {
            if cancel.load(Ordering::SeqCst) {
                warn!("Processing cancelled after {} of {} records", index, total);
                output.cancelled = true;
                break;
            }

            for field in PartyField::ALL {
                let Some(original) = record.party_mut(field).clone() else {
                    continue;
                };
                if !contains_tamil(&original) {
                    continue;
                }
                output.tamil_fragment_count += 1;

                if self.translator.has_remote() {
                    self.wait_for_slot(last_remote_call).await;
                    last_remote_call = Some(Instant::now());
                }

                let result = self.translator.translate(&original).await;
                *record.party_mut(field) = Some(result.translated.clone());

                output.translations.push(FieldTranslation {
                    record_index: index,
                    field,
                    result,
                });
            }

            output.records.push(record);
        }

        info!(
            records = output.records.len(),
            tamil_fragments = output.tamil_fragment_count,
            "Document processed"
        );

        Ok(output)
    }

    async fn wait_for_slot(&self, last_call: Option<Instant>) {
        let Some(last) = last_call else {
            return;
        };
        let elapsed = last.elapsed();
        if elapsed < self.inter_call_delay {
            let wait = self.inter_call_delay - elapsed;
            debug!("Throttling remote translation for {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::tests::StubRemote;
    use crate::translation::TranslationMethod;
    use pretty_assertions::assert_eq;

    fn block(serial: u32, buyer: &str, seller: &str) -> String {
        format!(
            "{serial} 06-Feb-2013 Document No: {serial}45/2013\n\
             Nature: Sale Deed\n\
             Consideration Value: ரூ. 12,345/-\n\
             Survey No: 45/2B\n\
             Name of Executant(s): {seller}\n\
             Name of Claimant(s): {buyer}\n"
        )
    }

    fn dictionary_pipeline() -> DocumentPipeline {
        DocumentPipeline::new(
            FieldExtractor::new(),
            Translator::new(Arc::new(Dictionary::default_tamil())),
        )
    }

    #[tokio::test]
    async fn test_tamil_buyer_translated_by_dictionary() {
        let text = format!("Header\n{}", block(1, "செல்வமுத்துகுமாரசாமி", "Anand Kumar"));
        let doc = dictionary_pipeline().process(&text).await.unwrap();

        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].buyer.as_deref(), Some("Selvamuthukumarasamy"));
        assert_eq!(doc.records[0].seller.as_deref(), Some("Anand Kumar"));
        assert_eq!(doc.records[0].value, Some(12345));
        assert_eq!(doc.tamil_fragment_count, 1);
        assert_eq!(doc.translations.len(), 1);
        assert_eq!(doc.translations[0].field, PartyField::Buyer);
        assert_eq!(doc.translations[0].result.method, TranslationMethod::Dictionary);
    }

    #[tokio::test]
    async fn test_other_fields_never_translated() {
        let text = format!(
            "{}Village: திருவெண்ணைநல்லூர், Villupuram\n",
            block(1, "ரவி", "சித்ரா")
        );
        let doc = dictionary_pipeline().process(&text).await.unwrap();
        let record = &doc.records[0];

        assert_eq!(record.buyer.as_deref(), Some("Ravi"));
        assert_eq!(record.seller.as_deref(), Some("Chitra"));
        assert_eq!(record.village.as_deref(), Some("திருவெண்ணைநல்லூர்"));
        assert_eq!(doc.tamil_fragment_count, 2);
    }

    #[tokio::test]
    async fn test_records_keep_source_order() {
        let text = format!(
            "{}{}{}",
            block(3, "ரவி", "x"),
            block(1, "Indian Bank", "y"),
            block(2, "வள்ளி", "z")
        );
        let doc = dictionary_pipeline().process(&text).await.unwrap();

        let serials: Vec<_> = doc
            .records
            .iter()
            .map(|r| r.serial_no.clone().unwrap())
            .collect();
        assert_eq!(serials, vec!["3", "1", "2"]);
        assert_eq!(doc.translations[0].record_index, 0);
        assert_eq!(doc.translations[1].record_index, 2);
    }

    #[tokio::test]
    async fn test_empty_document_is_error() {
        let result = dictionary_pipeline().process("  \n\t ").await;
        assert!(matches!(result, Err(EcxError::Document(_))));
    }

    #[tokio::test]
    async fn test_malformed_document_is_empty_result() {
        let doc = dictionary_pipeline()
            .process("Encumbrance Certificate\nNil encumbrance for the period searched.")
            .await
            .unwrap();
        assert!(doc.records.is_empty());
        assert_eq!(doc.tamil_fragment_count, 0);
        assert!(!doc.cancelled);
    }

    #[tokio::test]
    async fn test_remote_used_when_available() {
        let remote = Arc::new(StubRemote::ok("Ravi S"));
        let pipeline = DocumentPipeline::new(
            FieldExtractor::new(),
            Translator::new(Arc::new(Dictionary::default_tamil())).with_remote(remote.clone()),
        );

        let doc = pipeline.process(&block(1, "ரவி", "ரவி")).await.unwrap();
        assert_eq!(remote.calls(), 2);
        assert_eq!(doc.records[0].buyer.as_deref(), Some("Ravi S"));
        assert!(doc
            .translations
            .iter()
            .all(|t| t.result.method == TranslationMethod::Remote));
    }

    #[tokio::test]
    async fn test_blank_remote_answer_uses_dictionary() {
        let remote = Arc::new(StubRemote::ok(" "));
        let pipeline = DocumentPipeline::new(
            FieldExtractor::new(),
            Translator::new(Arc::new(Dictionary::default_tamil())).with_remote(remote),
        );

        let doc = pipeline.process(&block(1, "ரவி", "Anand")).await.unwrap();
        assert_eq!(doc.records[0].buyer.as_deref(), Some("Ravi"));
        assert_eq!(doc.translations[0].result.method, TranslationMethod::Dictionary);
        assert_eq!(doc.translations[0].result.translated, "Ravi");
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_config_without_key_is_not_throttled() {
        let pipeline =
            DocumentPipeline::from_config(&EcxConfig::default(), Arc::new(Dictionary::default_tamil()));
        assert!(!pipeline.translator().has_remote());

        let text = format!("{}{}", block(1, "ரவி", "சித்ரா"), block(2, "வள்ளி", "Bank"));
        let start = Instant::now();
        let doc = pipeline.process(&text).await.unwrap();

        assert_eq!(doc.tamil_fragment_count, 3);
        assert!(doc
            .translations
            .iter()
            .all(|t| t.result.method == TranslationMethod::Dictionary));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_calls_are_spaced() {
        let remote = Arc::new(StubRemote::ok("Name"));
        let pipeline = DocumentPipeline::new(
            FieldExtractor::new(),
            Translator::new(Arc::new(Dictionary::default_tamil())).with_remote(remote.clone()),
        )
        .with_inter_call_delay(Duration::from_millis(200));

        let text = format!("{}{}", block(1, "ரவி", "சித்ரா"), block(2, "வள்ளி", "Bank"));
        let start = Instant::now();
        pipeline.process(&text).await.unwrap();

        assert_eq!(remote.calls(), 3);
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    /// Remote that raises the cancel flag while answering.
    struct CancellingRemote {
        cancel: Arc<AtomicBool>,
    }

    #[async_trait::async_trait]
    impl crate::translation::RemoteTranslator for CancellingRemote {
        async fn translate(
            &self,
            _text: &str,
            _source: &str,
            _target: &str,
        ) -> std::result::Result<String, crate::error::TranslationError> {
            self.cancel.store(true, Ordering::SeqCst);
            Ok("Done".to_string())
        }
    }

    #[tokio::test]
    async fn test_cancel_mid_document_keeps_completed_records() {
        let cancel = Arc::new(AtomicBool::new(false));
        let pipeline = DocumentPipeline::new(
            FieldExtractor::new(),
            Translator::new(Arc::new(Dictionary::default_tamil())).with_remote(Arc::new(
                CancellingRemote {
                    cancel: cancel.clone(),
                },
            )),
        );

        let text = format!("{}{}", block(1, "ரவி", "Anand"), block(2, "வள்ளி", "Bank"));
        let doc = pipeline.process_with_cancel(&text, &cancel).await.unwrap();

        assert!(doc.cancelled);
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].serial_no.as_deref(), Some("1"));
        assert_eq!(doc.records[0].buyer.as_deref(), Some("Done"));
        assert_eq!(doc.translations.len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_returns_nothing() {
        let cancel = AtomicBool::new(true);
        let doc = dictionary_pipeline()
            .process_with_cancel(&block(1, "ரவி", "சித்ரா"), &cancel)
            .await
            .unwrap();

        assert!(doc.cancelled);
        assert!(doc.records.is_empty());
    }
}
