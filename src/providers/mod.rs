/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the pluggable backends:
 * - OpenAI: chat-completion based translation (API key required)
 * - DeepL: dedicated translation API (API key required)
 * - Google: free web translation endpoint (rate limited, bounded retry)
 * - Ollama: local LLM server
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::ProviderError;

/// Common trait for all translation backends
///
/// This trait defines the interface that all provider implementations must
/// follow, allowing the batch runner to stay agnostic of the selected
/// backend.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate one source text into the target language
    ///
    /// # Arguments
    /// * `text` - The source-language text
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;

    /// Human-readable backend name for logs
    fn name(&self) -> &str;
}

/// Build the translator selected by the configuration.
///
/// The credential check happens in `Config::validate()` before this is
/// called; the factory only wires the client together.
pub fn create_translator(config: &TranslationConfig) -> Arc<dyn Translator> {
    let endpoint = config.get_endpoint();
    let timeout_secs = config.get_timeout_secs();

    match config.provider {
        TranslationProvider::OpenAI => Arc::new(openai::OpenAI::new(
            config.get_api_key(),
            endpoint,
            config.get_model(),
            config.common.system_prompt.clone(),
            config.common.temperature,
            timeout_secs,
        )),
        TranslationProvider::DeepL => {
            Arc::new(deepl::DeepL::new(config.get_api_key(), endpoint, timeout_secs))
        }
        TranslationProvider::Google => Arc::new(google::GoogleTranslate::new(
            endpoint,
            timeout_secs,
            config.common.retry_count,
            config.common.retry_backoff_ms,
        )),
        TranslationProvider::Ollama => Arc::new(ollama::Ollama::new(
            endpoint,
            config.get_model(),
            timeout_secs,
        )),
    }
}

pub mod deepl;
pub mod google;
pub mod mock;
pub mod ollama;
pub mod openai;
