/*!
 * whisper.cpp-backed speech engine.
 */

use std::path::Path;

use async_trait::async_trait;
use hound::{SampleFormat, WavReader};
use log::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::errors::ModelError;
use crate::transcribe::{ModelKind, Segment, SpeechEngine};

/// Sample rate the engine expects, matching the extraction stage output
const EXPECTED_SAMPLE_RATE: u32 = 16_000;

/// A loaded whisper model ready to transcribe audio files
pub struct WhisperEngine {
    model: ModelKind,
    context: WhisperContext,
}

impl WhisperEngine {
    /// Load the weights for a model from the cache directory.
    ///
    /// The weights must already exist on disk; downloading is the model
    /// catalog's job.
    pub fn load(model: ModelKind, cache_dir: &Path) -> Result<Self, ModelError> {
        let weights = model.weights_path(cache_dir);
        info!("Loading model '{}' from {}", model, weights.display());

        let context = WhisperContext::new_with_params(
            &weights.to_string_lossy(),
            WhisperContextParameters::default(),
        )
        .map_err(|e| ModelError::LoadFailed {
            model: model.name().to_string(),
            reason: e.to_string(),
        })?;

        Ok(WhisperEngine { model, context })
    }

    /// Which model this engine was loaded with
    pub fn model(&self) -> ModelKind {
        self.model
    }

    fn run_decode(&self, samples: &[f32], language: Option<&str>) -> Result<Vec<Segment>, ModelError> {
        let mut state = self
            .context
            .create_state()
            .map_err(|e| ModelError::TranscriptionFailed(format!("failed to create state: {}", e)))?;

        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(threads as i32);
        params.set_language(language);
        params.set_print_realtime(false);
        params.set_print_progress(false);
        params.set_print_timestamps(false);

        state
            .full(params, samples)
            .map_err(|e| ModelError::TranscriptionFailed(format!("full decode failed: {}", e)))?;

        let mut segments = Vec::new();
        for idx in 0..state.full_n_segments() {
            let Some(segment) = state.get_segment(idx) else {
                continue;
            };
            // Engine timestamps are in centiseconds
            let start = segment.start_timestamp().max(0) as f64 / 100.0;
            let end = segment.end_timestamp().max(0) as f64 / 100.0;
            let text = segment
                .to_str_lossy()
                .map(|cow| cow.to_string())
                .unwrap_or_default();

            segments.push(Segment { start, end, text });
        }

        debug!("Decoded {} segments", segments.len());
        Ok(segments)
    }
}

#[async_trait]
impl SpeechEngine for WhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<Vec<Segment>, ModelError> {
        let samples = read_wav_samples(audio_path)?;
        // Decoding is CPU-bound and can run for minutes on large models;
        // keep the runtime's other workers responsive meanwhile
        tokio::task::block_in_place(|| self.run_decode(&samples, language))
    }
}

/// Read a mono 16 kHz 16-bit PCM WAV into normalized f32 samples.
///
/// Rejects anything with a different layout instead of resampling: the
/// extraction stage is responsible for producing the right format.
pub fn read_wav_samples(path: &Path) -> Result<Vec<f32>, ModelError> {
    let bad_audio = |reason: String| ModelError::BadAudio {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader =
        WavReader::open(path).map_err(|e| bad_audio(format!("cannot open WAV: {}", e)))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(bad_audio(format!("expected mono audio, found {} channels", spec.channels)));
    }
    if spec.sample_rate != EXPECTED_SAMPLE_RATE {
        return Err(bad_audio(format!(
            "expected {} Hz sample rate, found {} Hz",
            EXPECTED_SAMPLE_RATE, spec.sample_rate
        )));
    }
    if spec.bits_per_sample != 16 || spec.sample_format != SampleFormat::Int {
        return Err(bad_audio(format!(
            "expected 16-bit integer samples, found {}-bit {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
    let samples = samples.map_err(|e| bad_audio(format!("cannot read samples: {}", e)))?;

    Ok(samples.iter().map(|&s| s as f32 / 32768.0).collect())
}
