/*!
 * Translation service clients.
 *
 * The pipeline talks to machine translation through the
 * [`TranslationProvider`] trait; `google` is the production client and
 * `mock` backs the test suite.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation services.
///
/// Implementations translate one piece of text at a time; batching and
/// concurrency live in the translation stage, not here.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Translate `text` from `source` (or "auto") into `target`
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError>;

    /// Language codes this provider accepts as a target
    fn supported_languages(&self) -> &[&'static str];
}

pub mod google;
pub mod mock;

pub use google::GoogleTranslate;
pub use mock::{MockBehavior, MockProvider};
