use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Ollama client for translating with a locally hosted model
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Model name to use for generation
    model: String,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    pub done: bool,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: Some(false),
        }
    }
}

impl Ollama {
    /// Create a new Ollama client
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            model: model.into(),
        }
    }

    /// Complete a generation request
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let api_url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Ollama API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Ollama API response: {}", e)))
    }
}

#[async_trait]
impl Translator for Ollama {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let prompt = format!(
            "请将以下英文技术描述翻译成简体中文，只输出翻译结果：\n\n{}",
            text
        );

        let request = GenerationRequest::new(&self.model, prompt);
        let response = self.generate(request).await?;

        Ok(response.response.trim().to_string())
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
