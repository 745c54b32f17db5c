/*!
 * Speech transcription boundary.
 *
 * Defines the engine-facing types (timed segments, the [`SpeechEngine`]
 * trait) and the [`EngineManager`] that owns the lazily-loaded model handle
 * shared between pipeline runs.
 */

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::info;
use tokio::sync::Mutex;

use crate::errors::ModelError;

pub mod model;
pub mod whisper;

pub use model::ModelKind;
pub use whisper::WhisperEngine;

/// A raw timed unit of recognized speech
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Recognized text
    pub text: String,
}

/// Interface every transcription engine implements.
///
/// `language` is `None` for auto-detection or an ISO 639-1 code to pin the
/// spoken language.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<Vec<Segment>, ModelError>;
}

/// Owns the cached engine handle shared across pipeline runs.
///
/// Loading happens lazily on first use; requesting a different model drops
/// the old handle and loads the new one. Load and use happen under one async
/// mutex guard so a concurrent run can never swap the model out from under
/// an in-flight transcription.
pub struct EngineManager {
    cache_dir: PathBuf,
    current: Mutex<Option<WhisperEngine>>,
}

impl EngineManager {
    /// Manager with an explicit cache directory for model weights
    pub fn new(cache_dir: PathBuf) -> Self {
        EngineManager {
            cache_dir,
            current: Mutex::new(None),
        }
    }

    /// Manager with the default per-user cache directory
    pub fn with_default_cache_dir() -> Result<Self> {
        let base = dirs::cache_dir().ok_or_else(|| anyhow!("No cache directory available"))?;
        Ok(Self::new(base.join("subburn")))
    }

    /// Where model weights are cached
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Downloaded state of every model in the catalog
    pub fn model_status(&self) -> Vec<(ModelKind, bool)> {
        ModelKind::all()
            .into_iter()
            .map(|m| (m, m.is_downloaded(&self.cache_dir)))
            .collect()
    }

    /// Transcribe an audio file with the requested model, loading or
    /// swapping the cached engine first if necessary.
    pub async fn transcribe(
        &self,
        model: ModelKind,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<Vec<Segment>, ModelError> {
        let mut guard = self.current.lock().await;

        let cached = guard.as_ref().map(|engine| engine.model());
        if cached != Some(model) {
            if let Some(previous) = cached {
                info!("Releasing model '{}' to load '{}'", previous, model);
            }
            // Free the old weights before the replacement is loaded
            *guard = None;
            model.ensure_available(&self.cache_dir).await?;
            *guard = Some(WhisperEngine::load(model, &self.cache_dir)?);
        }

        let engine = guard.as_ref().expect("engine loaded above");
        engine.transcribe(audio_path, language).await
    }
}
