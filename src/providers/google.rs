use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Client for the free Google web translation endpoint.
///
/// The endpoint is unauthenticated and rate limited, so every call goes
/// through a bounded retry loop: a fixed number of attempts with a fixed
/// pause between them, re-raising the last error on exhaustion. The batch
/// runner additionally serializes units for this provider.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint base URL
    endpoint: String,
    /// Number of attempts before giving up
    max_attempts: u32,
    /// Fixed pause between attempts in milliseconds
    backoff_ms: u64,
}

impl GoogleTranslate {
    /// Create a new client for the free web endpoint
    pub fn new(
        endpoint: impl Into<String>,
        timeout_secs: u64,
        max_attempts: u32,
        backoff_ms: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            max_attempts: max_attempts.max(1),
            backoff_ms,
        }
    }

    /// Issue one translation request without retrying
    async fn translate_once(&self, text: &str) -> Result<String, ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            "https://translate.googleapis.com/translate_a/single".to_string()
        } else {
            format!(
                "{}/translate_a/single",
                self.endpoint.trim_end_matches('/')
            )
        };

        let response = self
            .client
            .get(&api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", "en"),
                ("tl", "zh-CN"),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Google translate: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded(
                "Google translate returned 429".to_string(),
            ));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Google translate response: {}", e)))?;

        Self::extract_translation(&body)
    }

    /// Pull the translated text out of the endpoint's nested-array payload.
    ///
    /// The first element is a list of segments; each segment's first element
    /// is a translated chunk. Segments are concatenated in order.
    fn extract_translation(body: &serde_json::Value) -> Result<String, ProviderError> {
        let segments = body
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ProviderError::ParseError("Google translate payload missing segments".to_string())
            })?;

        let mut translated = String::new();
        for segment in segments {
            if let Some(chunk) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(chunk);
            }
        }

        if translated.is_empty() {
            return Err(ProviderError::ParseError(
                "Google translate payload contained no text".to_string(),
            ));
        }

        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslate {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match self.translate_once(text).await {
                Ok(translated) => return Ok(translated),
                Err(e) => {
                    if attempt < self.max_attempts {
                        warn!(
                            "Google translate attempt {}/{} failed: {}",
                            attempt, self.max_attempts, e
                        );
                        tokio::time::sleep(Duration::from_millis(self.backoff_ms)).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        let last_error = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        Err(ProviderError::RetriesExhausted {
            attempts: self.max_attempts,
            last_error,
        })
    }

    fn name(&self) -> &str {
        "Google Translate"
    }
}
