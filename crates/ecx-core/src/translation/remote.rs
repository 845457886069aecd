//! Remote translation service client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TranslationError;
use crate::models::config::TranslationConfig;

/// A remote machine-translation service.
#[async_trait]
pub trait RemoteTranslator: Send + Sync {
    /// Translate `text` from `source` to `target` language codes.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;

    /// Service name for logging.
    fn name(&self) -> &str {
        "remote"
    }
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// Client for the Google Cloud Translation v2 REST API.
pub struct GoogleTranslateClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GoogleTranslateClient {
    /// Create a client for `endpoint`.
    ///
    /// Without an API key every call fails with `MissingCredentials`
    /// before touching the network.
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "failed to build HTTP client, request timeout not applied");
                reqwest::Client::new()
            });

        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Create a client from the translation configuration.
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            Duration::from_millis(config.timeout_ms),
        )
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Pull the first translation out of a v2 response body.
fn first_translation(body: &str) -> Result<String, TranslationError> {
    let response: TranslateResponse = serde_json::from_str(body)
        .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| TranslationError::MalformedResponse("no translations in response".to_string()))
}

#[async_trait]
impl RemoteTranslator for GoogleTranslateClient {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TranslationError::MissingCredentials)?;

        let request = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
        };

        debug!(endpoint = %self.endpoint, chars = text.chars().count(), "requesting translation");
        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        first_translation(&body)
    }

    fn name(&self) -> &str {
        "google-translate-v2"
    }
}
