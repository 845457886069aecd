//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the ecx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EcxConfig {
    /// Transaction block extraction configuration.
    pub extraction: ExtractionConfig,

    /// Remote translation configuration.
    pub translation: TranslationConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Transaction block extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Blocks shorter than this many characters are dropped as stray headers/footers.
    pub min_block_length: usize,

    /// Records with fewer populated fields are dropped as noise.
    ///
    /// Values below [`MIN_POPULATED_FIELDS`] are raised to it when the
    /// extractor is built from configuration.
    pub min_populated_fields: usize,
}

/// Lowest retention threshold accepted from configuration.
pub const MIN_POPULATED_FIELDS: usize = 4;

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_block_length: 50,
            min_populated_fields: MIN_POPULATED_FIELDS,
        }
    }
}

/// Remote translation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Try the remote service before the dictionary.
    pub enabled: bool,

    /// Translation endpoint (Google Translate v2 compatible).
    pub endpoint: String,

    /// API key. When absent the remote attempt fails fast and the dictionary is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Source language code.
    pub source_lang: String,

    /// Target language code.
    pub target_lang: String,

    /// Timeout for a single remote call, in milliseconds.
    pub timeout_ms: u64,

    /// Minimum delay between consecutive remote calls within a document, in milliseconds.
    pub inter_call_delay_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://translation.googleapis.com/language/translate/v2".to_string(),
            api_key: None,
            source_lang: "ta".to_string(),
            target_lang: "en".to_string(),
            timeout_ms: 10_000,
            inter_call_delay_ms: 200,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum extracted text length to consider the PDF usable.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 50 }
    }
}

impl EcxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EcxConfig =
            serde_json::from_str(r#"{"translation": {"timeout_ms": 2500}}"#).unwrap();

        assert_eq!(config.translation.timeout_ms, 2500);
        assert_eq!(config.translation.source_lang, "ta");
        assert_eq!(config.extraction.min_block_length, 50);
        assert_eq!(config.extraction.min_populated_fields, 4);
    }

    #[test]
    fn test_api_key_not_written_when_absent() {
        let json = serde_json::to_value(EcxConfig::default()).unwrap();
        assert!(json["translation"].get("api_key").is_none());
    }
}
