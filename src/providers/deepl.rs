use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// DeepL client for the dedicated translation API
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL
    endpoint: String,
}

/// DeepL translate request
#[derive(Debug, Serialize)]
pub struct TranslateRequest {
    /// Texts to translate
    text: Vec<String>,
    /// Target language code
    target_lang: String,
    /// Source language code
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    /// Translation results, one per input text
    pub translations: Vec<Translation>,
}

/// Individual translation result
#[derive(Debug, Deserialize)]
pub struct Translation {
    /// Detected source language
    #[serde(default)]
    pub detected_source_language: Option<String>,
    /// The translated text
    pub text: String,
}

impl DeepL {
    /// Target language for the skills tree
    const TARGET_LANG: &'static str = "ZH";

    /// Create a new DeepL client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Translate a batch of texts
    pub async fn translate_texts(
        &self,
        texts: Vec<String>,
    ) -> Result<TranslateResponse, ProviderError> {
        let api_url = if self.endpoint.is_empty() {
            "https://api.deepl.com/v2/translate".to_string()
        } else {
            format!("{}/v2/translate", self.endpoint.trim_end_matches('/'))
        };

        let request = TranslateRequest {
            text: texts,
            target_lang: Self::TARGET_LANG.to_string(),
            source_lang: Some("EN".to_string()),
        };

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("DeepL API: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded(
                "DeepL API returned 429".to_string(),
            ));
        }
        if status.as_u16() == 403 {
            return Err(ProviderError::AuthenticationError(
                "DeepL API rejected the auth key".to_string(),
            ));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("DeepL API response: {}", e)))
    }
}

#[async_trait]
impl Translator for DeepL {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let response = self.translate_texts(vec![text.to_string()]).await?;

        response
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| {
                ProviderError::ParseError("DeepL response contained no translations".to_string())
            })
    }

    fn name(&self) -> &str {
        "DeepL"
    }
}
