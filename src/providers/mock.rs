/*!
 * Mock translator implementations for testing.
 *
 * This module provides mock backends that simulate different behaviors:
 * - `MockTranslator::working()` - Always succeeds with a marked translation
 * - `MockTranslator::failing()` - Always fails with an error
 * - `MockTranslator::intermittent(n)` - Fails every nth request
 *
 * Every mock counts its calls, which lets tests assert that the backend is
 * never invoked on verbatim-copy and dry-run paths.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Behavior mode for the mock translator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a marked translation
    Working,
    /// Fails intermittently (every nth request)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

/// Mock translator for testing batch behavior
#[derive(Debug)]
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter
    call_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock translator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock translator that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock translator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock translator
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Number of translate calls made so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working => Ok(format!("[译] {}", text)),
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && call % fail_every == 0 {
                    Err(ProviderError::RequestFailed(format!(
                        "simulated intermittent failure on call {}",
                        call
                    )))
                } else {
                    Ok(format!("[译] {}", text))
                }
            }
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "simulated backend failure".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
