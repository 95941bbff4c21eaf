/*!
 * Provider-specific concurrency tuning.
 *
 * This module provides worker-pool settings based on provider
 * characteristics such as rate limits and whether the service is local.
 */

use crate::app_config::TranslationProvider;

/// Provider-specific concurrency profile with tuned defaults
#[derive(Debug, Clone)]
pub struct ProviderProfile {
    /// Maximum concurrent units in flight
    pub max_workers: usize,
    /// Fixed delay inserted between units, for rate-limited providers
    pub inter_unit_delay_ms: Option<u64>,
}

impl ProviderProfile {
    /// Get the profile for a given provider
    pub fn for_provider(provider: TranslationProvider, rate_limit_delay_ms: u64) -> Self {
        match provider {
            TranslationProvider::OpenAI => Self {
                max_workers: 8,
                inter_unit_delay_ms: None,
            },
            TranslationProvider::DeepL => Self {
                max_workers: 5,
                inter_unit_delay_ms: None,
            },
            TranslationProvider::Google => Self {
                // The free web endpoint bans aggressive clients; serialize
                // units and pause between them
                max_workers: 1,
                inter_unit_delay_ms: Some(rate_limit_delay_ms),
            },
            TranslationProvider::Ollama => Self {
                // Local server, no rate limit; bound by model throughput
                max_workers: 4,
                inter_unit_delay_ms: None,
            },
        }
    }

    /// Effective worker count for a requested value.
    ///
    /// Rate-limited providers are always forced to a single worker; other
    /// providers honor the request up to the profile maximum.
    pub fn effective_workers(&self, requested: usize) -> usize {
        if self.inter_unit_delay_ms.is_some() {
            return 1;
        }
        requested.clamp(1, self.max_workers)
    }
}
