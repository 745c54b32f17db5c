/*!
 * Mock translation provider for testing.
 *
 * Behaviors cover the interesting shapes: always succeeding, always
 * failing, and completing calls out of submission order to exercise the
 * translation stage's order preservation.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, tagging the text with the target language
    Working,

    /// Always fails with an error
    Failing,

    /// Fails on the Nth call (1-based), succeeds otherwise
    FailOn { call: usize },

    /// Succeeds, but earlier calls sleep longer than later ones so
    /// completions arrive in reverse submission order
    Staggered { start_ms: u64, step_ms: u64 },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a mock with the given behavior
    pub fn new(behavior: MockBehavior) -> Self {
        MockProvider {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Mock that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// How many translate calls were made
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn render(text: &str, target: &str) -> String {
        format!("[{}] {}", target, text)
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(Self::render(text, target)),
            MockBehavior::Failing => {
                Err(ProviderError::RequestFailed("mock failure".to_string()))
            }
            MockBehavior::FailOn { call: fail_call } => {
                if call + 1 == fail_call {
                    Err(ProviderError::RequestFailed(format!(
                        "mock failure on call {}",
                        fail_call
                    )))
                } else {
                    Ok(Self::render(text, target))
                }
            }
            MockBehavior::Staggered { start_ms, step_ms } => {
                let delay = start_ms.saturating_sub(step_ms * call as u64);
                tokio::time::sleep(Duration::from_millis(delay)).await;
                Ok(Self::render(text, target))
            }
        }
    }

    fn supported_languages(&self) -> &[&'static str] {
        &["en", "it", "fr", "de", "es"]
    }
}
