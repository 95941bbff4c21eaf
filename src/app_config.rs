use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Root directory scanned for translation units
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// File name of the source-language text inside a unit directory
    #[serde(default = "default_source_file_name")]
    pub source_file_name: String,

    /// File name of the target-language sibling inside a unit directory
    #[serde(default = "default_target_file_name")]
    pub target_file_name: String,

    /// Path of the persisted progress file (completed unit ids)
    #[serde(default = "default_progress_file")]
    pub progress_file: PathBuf,

    /// Translation config
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: DeepL
    DeepL,
    // @provider: Google web translate (free, rate limited)
    Google,
    // @provider: Ollama (local model)
    Ollama,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::DeepL => "DeepL",
            Self::Google => "Google Translate",
            Self::Ollama => "Ollama",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::DeepL => "deepl".to_string(),
            Self::Google => "google".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }

    /// Environment variable holding the API key, for credentialed providers
    pub fn api_key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::DeepL => Some("DEEPL_API_KEY"),
            Self::Google | Self::Ollama => None,
        }
    }

    /// Whether the provider needs an API key to operate
    pub fn requires_api_key(&self) -> bool {
        self.api_key_env_var().is_some()
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "deepl" => Ok(Self::DeepL),
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::OpenAI => Self {
                provider_type: "openai".to_string(),
                model: default_openai_model(),
                api_key: String::new(),
                endpoint: default_openai_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::DeepL => Self {
                provider_type: "deepl".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: default_deepl_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Google => Self {
                provider_type: "google".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: default_google_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_ollama_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt for LLM-backed providers
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Delay in milliseconds between consecutive units for rate-limited providers
    #[serde(default = "default_rate_limit_delay_ms")]
    pub rate_limit_delay_ms: u64,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Fixed backoff between retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Share of target-script characters above which a source text is
    /// copied verbatim instead of translated. This is a heuristic policy,
    /// not a language detector.
    #[serde(default = "default_target_script_ratio")]
    pub target_script_ratio: f32,

    /// How often (in completed units) to emit an aggregate progress line
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            rate_limit_delay_ms: default_rate_limit_delay_ms(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_temperature(),
            target_script_ratio: default_target_script_ratio(),
            progress_interval: default_progress_interval(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("data/skills-md")
}

fn default_source_file_name() -> String {
    "description_en.txt".to_string()
}

fn default_target_file_name() -> String {
    "description_cn.txt".to_string()
}

fn default_progress_file() -> PathBuf {
    PathBuf::from(".translate_progress.json")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_ollama_timeout_secs() -> u64 {
    120
}

fn default_rate_limit_delay_ms() -> u64 {
    500 // 500ms default delay between units for rate-limited providers
}

fn default_retry_count() -> u32 {
    3 // Default to 3 attempts
}

fn default_retry_backoff_ms() -> u64 {
    1000 // Fixed 1 second pause between attempts
}

fn default_temperature() -> f32 {
    0.3
}

fn default_target_script_ratio() -> f32 {
    0.3
}

fn default_progress_interval() -> usize {
    100
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_deepl_endpoint() -> String {
    "https://api.deepl.com".to_string()
}

fn default_google_endpoint() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_ollama_model() -> String {
    "qwen2.5:7b".to_string()
}

fn default_system_prompt() -> String {
    "You are a professional technical documentation translator. Translate the \
     following English technical description into Simplified Chinese. Keep \
     terminology accurate and the translation concise and fluent. Output only \
     the translation, with no explanations."
        .to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.source_file_name.is_empty() || self.target_file_name.is_empty() {
            return Err(anyhow!("Source and target file names must not be empty"));
        }

        if self.source_file_name == self.target_file_name {
            return Err(anyhow!(
                "Source and target file names must differ: {}",
                self.source_file_name
            ));
        }

        let ratio = self.translation.common.target_script_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(anyhow!(
                "target_script_ratio must be within [0.0, 1.0], got {}",
                ratio
            ));
        }

        // Endpoints must be well-formed URLs when set
        if let Some(provider_config) = self.translation.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                url::Url::parse(&provider_config.endpoint).map_err(|e| {
                    anyhow!(
                        "Invalid endpoint URL for provider {}: {}",
                        provider_config.provider_type,
                        e
                    )
                })?;
            }
        }

        // Validate API key for credentialed providers
        let provider = self.translation.provider;
        if provider.requires_api_key() && self.translation.get_api_key().is_empty() {
            let env_var = provider.api_key_env_var().unwrap_or_default();
            return Err(anyhow!(
                "Translation API key is required for the {} provider. \
                 Set the {} environment variable or the api_key config field.",
                provider.display_name(),
                env_var
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            base_dir: default_base_dir(),
            source_file_name: default_source_file_name(),
            target_file_name: default_target_file_name(),
            progress_file: default_progress_file(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        let provider_str = self.provider.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::OpenAI => default_openai_model(),
            TranslationProvider::Ollama => default_ollama_model(),
            TranslationProvider::DeepL | TranslationProvider::Google => String::new(),
        }
    }

    /// Get the API key for the active provider, falling back to the
    /// provider's environment variable
    pub fn get_api_key(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.api_key.is_empty() {
                return provider_config.api_key.clone();
            }
        }

        if let Some(env_var) = self.provider.api_key_env_var() {
            if let Ok(key) = std::env::var(env_var) {
                if !key.is_empty() {
                    return key;
                }
            }
        }

        String::new()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        // Default fallback based on provider type
        match self.provider {
            TranslationProvider::OpenAI => default_openai_endpoint(),
            TranslationProvider::DeepL => default_deepl_endpoint(),
            TranslationProvider::Google => default_google_endpoint(),
            TranslationProvider::Ollama => default_ollama_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.timeout_secs > 0 {
                return provider_config.timeout_secs;
            }
        }

        match self.provider {
            TranslationProvider::Ollama => default_ollama_timeout_secs(),
            _ => default_timeout_secs(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let mut config = Self {
            provider: TranslationProvider::default(),
            available_providers: Vec::new(),
            common: TranslationCommonConfig::default(),
        };

        // Add default providers
        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::OpenAI));
        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::DeepL));
        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::Google));
        config
            .available_providers
            .push(ProviderConfig::new(TranslationProvider::Ollama));

        config
    }
}
