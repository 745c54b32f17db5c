/*!
 * Google web translation client.
 *
 * Talks to the public `translate_a/single` endpoint, the same service the
 * desktop tools in this space use. One request per text; no retries — retry
 * policy belongs to the caller.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Default endpoint for the unauthenticated translation API
const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Target languages offered through the UI and CLI, in display order
const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "it", "fr", "de", "es", "pt", "nl", "ru", "zh", "ja", "ko",
];

/// Client for the Google web translation endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Endpoint URL
    endpoint: String,

    /// HTTP client for making requests
    client: Client,
}

impl Default for GoogleTranslate {
    fn default() -> Self {
        Self::new()
    }
}

impl GoogleTranslate {
    /// Client against the default endpoint
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string())
    }

    /// Client against a custom endpoint, for tests and proxies
    pub fn with_endpoint(endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        GoogleTranslate { endpoint, client }
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        debug!("Translating {} chars {} -> {}", text.len(), source, target);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        parse_translation_response(&body)
    }

    fn supported_languages(&self) -> &[&'static str] {
        SUPPORTED_LANGUAGES
    }
}

/// Extract the translated text from the endpoint's nested-array response.
///
/// The body looks like `[[["Ciao","Hello",...],["mondo","world",...]],...]`;
/// the translation is the concatenation of the first element of each inner
/// sentence array.
pub fn parse_translation_response(body: &str) -> Result<String, ProviderError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::ResponseParse(e.to_string()))?;

    let sentences = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ResponseParse("missing sentence list".to_string()))?;

    let mut translated = String::new();
    for sentence in sentences {
        if let Some(part) = sentence.get(0).and_then(Value::as_str) {
            translated.push_str(part);
        }
    }

    if translated.is_empty() {
        return Err(ProviderError::ResponseParse(
            "response contained no translated text".to_string(),
        ));
    }

    Ok(translated)
}
