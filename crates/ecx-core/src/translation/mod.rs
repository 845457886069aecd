//! Tamil to English translation with a remote-first, dictionary-fallback strategy.
//!
//! Each call walks a small state machine:
//!
//! - no Tamil in the input: the text is passed through untouched;
//! - Tamil present and a remote service configured: the service is tried
//!   once, bounded by a timeout;
//! - remote missing or failed: the dictionary is applied, which always
//!   produces a value.

mod dictionary;
mod remote;

pub use dictionary::Dictionary;
pub use remote::{GoogleTranslateClient, RemoteTranslator};

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TranslationError;
use crate::models::config::TranslationConfig;
use crate::text::contains_tamil;

/// How a fragment was translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationMethod {
    /// Returned by the remote service.
    Remote,
    /// Produced by the static dictionary.
    Dictionary,
    /// No Tamil content; returned unchanged.
    Passthrough,
}

/// A translated fragment together with its source and method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub original: String,
    pub translated: String,
    pub method: TranslationMethod,
}

impl TranslationResult {
    fn passthrough(text: &str) -> Self {
        Self {
            original: text.to_string(),
            translated: text.to_string(),
            method: TranslationMethod::Passthrough,
        }
    }
}

/// Two-tier translator.
#[derive(Clone)]
pub struct Translator {
    remote: Option<Arc<dyn RemoteTranslator>>,
    dictionary: Arc<Dictionary>,
    timeout: Duration,
    source_lang: String,
    target_lang: String,
}

impl Translator {
    /// Create a dictionary-only translator.
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        let defaults = TranslationConfig::default();
        Self {
            remote: None,
            dictionary,
            timeout: Duration::from_millis(defaults.timeout_ms),
            source_lang: defaults.source_lang,
            target_lang: defaults.target_lang,
        }
    }

    /// Create a translator from configuration.
    ///
    /// A Google Translate client is attached only when translation is
    /// enabled and an API key is configured.
    pub fn from_config(config: &TranslationConfig, dictionary: Arc<Dictionary>) -> Self {
        let translator = Self::new(dictionary)
            .with_timeout(Duration::from_millis(config.timeout_ms))
            .with_languages(&config.source_lang, &config.target_lang);

        if !config.enabled {
            return translator;
        }

        let client = GoogleTranslateClient::from_config(config);
        if client.has_credentials() {
            translator.with_remote(Arc::new(client))
        } else {
            debug!("No translation API key configured, using the dictionary only");
            translator
        }
    }

    /// Attach a remote service.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteTranslator>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Set the remote call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set source and target language codes for the remote service.
    pub fn with_languages(mut self, source: &str, target: &str) -> Self {
        self.source_lang = source.to_string();
        self.target_lang = target.to_string();
        self
    }

    /// Whether Tamil input will trigger a remote call.
    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Translate a fragment. Never fails.
    pub async fn translate(&self, text: &str) -> TranslationResult {
        if !contains_tamil(text) {
            return TranslationResult::passthrough(text);
        }

        let Some(remote) = &self.remote else {
            return self.translate_with_dictionary(text);
        };

        match self.attempt_remote(remote.as_ref(), text).await {
            Ok(translated) if translated.trim().is_empty() => {
                let e = TranslationError::MalformedResponse("blank translation".to_string());
                warn!(service = remote.name(), error = %e, "remote translation failed, using dictionary");
                self.translate_with_dictionary(text)
            }
            Ok(translated) => {
                debug!(service = remote.name(), "remote translation succeeded");
                TranslationResult {
                    original: text.to_string(),
                    translated,
                    method: TranslationMethod::Remote,
                }
            }
            Err(e) => {
                warn!(service = remote.name(), error = %e, "remote translation failed, using dictionary");
                self.translate_with_dictionary(text)
            }
        }
    }

    /// Translate with the dictionary only.
    pub fn translate_with_dictionary(&self, text: &str) -> TranslationResult {
        TranslationResult {
            original: text.to_string(),
            translated: self.dictionary.apply(text),
            method: TranslationMethod::Dictionary,
        }
    }

    async fn attempt_remote(
        &self,
        remote: &dyn RemoteTranslator,
        text: &str,
    ) -> Result<String, TranslationError> {
        let call = remote.translate(text, &self.source_lang, &self.target_lang);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(TranslationError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("remote", &self.remote.as_ref().map(|r| r.name().to_string()))
            .field("dictionary_entries", &self.dictionary.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}
