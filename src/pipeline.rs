/*!
 * Pipeline orchestration.
 *
 * Sequences the stages that turn a video into a subtitled video: audio
 * extraction, transcription, subtitle writing, optional text transforms,
 * style compilation, and the burn itself. Each run reports progress over a
 * bounded channel, checks for cancellation between stages, and cleans up
 * the scratch files it created on every exit path.
 */

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::errors::PipelineError;
use crate::media_engine::{BurnRequest, MediaEngine};
use crate::providers::TranslationProvider;
use crate::style::{self, StyleSpec};
use crate::subtitle_processor::SubtitleDocument;
use crate::text_transform::{self, TransformOptions};
use crate::transcribe::{EngineManager, ModelKind};
use crate::translation;

/// Capacity of the progress event channel
const PROGRESS_CHANNEL_CAPACITY: usize = 32;

/// Stages a pipeline run moves through, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ExtractingAudio,
    Transcribing,
    WritingSubtitles,
    TransformingText,
    Translating,
    CompilingStyle,
    Burning,
    CleaningUp,
    Done,
}

impl Stage {
    /// Human-readable stage label for progress display
    pub fn label(&self) -> &'static str {
        match self {
            Stage::ExtractingAudio => "Extracting audio",
            Stage::Transcribing => "Transcribing audio",
            Stage::WritingSubtitles => "Writing subtitles",
            Stage::TransformingText => "Transforming subtitle text",
            Stage::Translating => "Translating subtitles",
            Stage::CompilingStyle => "Compiling subtitle style",
            Stage::Burning => "Burning subtitles",
            Stage::CleaningUp => "Cleaning up",
            Stage::Done => "Done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A progress milestone emitted by a running pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// The stage the run is entering
    pub stage: Stage,

    /// Fixed percentage milestone for the stage, 0-100
    pub percent: u8,
}

/// Sending half of a run's progress stream.
///
/// A dropped or slow receiver never fails the run; events are simply
/// discarded once nobody listens.
#[derive(Clone)]
pub struct ProgressReporter {
    tx: Option<mpsc::Sender<ProgressEvent>>,
}

impl ProgressReporter {
    /// Reporter wired to a bounded channel the caller drains
    pub fn channel() -> (Self, mpsc::Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
        (ProgressReporter { tx: Some(tx) }, rx)
    }

    /// Reporter that discards every event, for headless runs and tests
    pub fn none() -> Self {
        ProgressReporter { tx: None }
    }

    async fn emit(&self, stage: Stage, percent: u8) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(ProgressEvent { stage, percent }).await;
        }
    }
}

/// Cooperative cancellation flag checked between stages.
///
/// The external tools cannot be interrupted mid-call, so cancellation takes
/// effect at the next stage boundary; cleanup still runs.
#[derive(Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    /// New, un-cancelled flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run holding this flag
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Scratch files created by one run, removed when the run ends.
///
/// Only registered paths are touched, so a failed run removes its own
/// artifacts and nothing else.
#[derive(Debug, Default)]
pub struct ScratchTracker {
    paths: Vec<PathBuf>,
}

impl ScratchTracker {
    /// Empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a file this run created
    pub fn register(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Remove every registered file. Best effort: failures are logged and
    /// never override the run's outcome.
    pub fn cleanup(&mut self) {
        for path in self.paths.drain(..) {
            if !path.exists() {
                continue;
            }
            if let Err(e) = fs::remove_file(&path) {
                warn!("Failed to remove scratch file {}: {}", path.display(), e);
            }
        }
    }
}

/// Parameters for a subtitle generation run
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Input video file
    pub video_path: PathBuf,

    /// Where the subtitle file is written
    pub subtitle_path: PathBuf,

    /// Transcription model to use
    pub model: ModelKind,

    /// Spoken language code, or None to auto-detect
    pub language: Option<String>,
}

/// Parameters for a burn run
#[derive(Debug, Clone)]
pub struct BurnOptions {
    /// Output video path; derived from the input when None
    pub output_path: Option<PathBuf>,

    /// Overlay style configuration
    pub style: StyleSpec,

    /// Text transformations to apply before burning
    pub transform: TransformOptions,

    /// x264 CRF value, lower is higher quality
    pub quality: u32,

    /// x264 speed preset name
    pub preset: String,
}

impl Default for BurnOptions {
    fn default() -> Self {
        BurnOptions {
            output_path: None,
            style: StyleSpec::default(),
            transform: TransformOptions::default(),
            quality: 23,
            preset: "medium".to_string(),
        }
    }
}

/// Orchestrates pipeline runs against the shared engine manager
pub struct Pipeline {
    engines: Arc<EngineManager>,
    cancel: CancellationFlag,
}

impl Pipeline {
    /// Pipeline over a shared engine manager
    pub fn new(engines: Arc<EngineManager>) -> Self {
        Pipeline {
            engines,
            cancel: CancellationFlag::new(),
        }
    }

    /// Handle for requesting cancellation from another task
    pub fn cancellation_flag(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    fn checkpoint(&self) -> Result<(), PipelineError> {
        if self.cancel.is_cancelled() {
            Err(PipelineError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Create a subtitle file for a video: extract audio, transcribe, and
    /// write the document to `subtitle_path`. An existing file at that path
    /// is first copied to a `.bak` sibling.
    pub async fn generate_subtitles(
        &self,
        request: &GenerateRequest,
        progress: &ProgressReporter,
    ) -> Result<(), PipelineError> {
        let mut scratch = ScratchTracker::new();
        let result = self.run_generate(request, progress, &mut scratch).await;

        progress.emit(Stage::CleaningUp, 90).await;
        scratch.cleanup();

        if result.is_ok() {
            progress.emit(Stage::Done, 100).await;
            info!("Subtitles written to {}", request.subtitle_path.display());
        }
        result
    }

    async fn run_generate(
        &self,
        request: &GenerateRequest,
        progress: &ProgressReporter,
        scratch: &mut ScratchTracker,
    ) -> Result<(), PipelineError> {
        let run_id = new_run_id();

        self.checkpoint()?;
        progress.emit(Stage::ExtractingAudio, 20).await;
        let audio_path = scratch_audio_path(&request.video_path, &run_id);
        MediaEngine::extract_audio(&request.video_path, &audio_path)
            .await
            .map_err(|e| PipelineError::at(Stage::ExtractingAudio.label(), e))?;
        scratch.register(audio_path.clone());

        self.checkpoint()?;
        progress.emit(Stage::Transcribing, 40).await;
        let segments = self
            .engines
            .transcribe(request.model, &audio_path, request.language.as_deref())
            .await
            .map_err(|e| PipelineError::at(Stage::Transcribing.label(), e.into()))?;

        self.checkpoint()?;
        progress.emit(Stage::WritingSubtitles, 80).await;
        let doc = SubtitleDocument::from_segments(segments);
        backup_existing(&request.subtitle_path);
        doc.write_to_file(&request.subtitle_path)
            .map_err(|e| PipelineError::at(Stage::WritingSubtitles.label(), e))?;

        Ok(())
    }

    /// Burn a subtitle file into a video, applying text transforms and the
    /// compiled style. Returns the output video path.
    pub async fn burn(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        options: &BurnOptions,
        progress: &ProgressReporter,
    ) -> Result<PathBuf, PipelineError> {
        let mut scratch = ScratchTracker::new();
        let result = self
            .run_burn(video_path, subtitle_path, options, progress, &mut scratch)
            .await;

        progress.emit(Stage::CleaningUp, 90).await;
        scratch.cleanup();

        if let Ok(output) = &result {
            progress.emit(Stage::Done, 100).await;
            info!("Burned video written to {}", output.display());
        }
        result
    }

    async fn run_burn(
        &self,
        video_path: &Path,
        subtitle_path: &Path,
        options: &BurnOptions,
        progress: &ProgressReporter,
        scratch: &mut ScratchTracker,
    ) -> Result<PathBuf, PipelineError> {
        let run_id = new_run_id();

        // Optional transform stage writes its own intermediate file so the
        // source subtitle is never overwritten; with no transforms the
        // source is used directly and no intermediate exists to clean up
        let burn_subtitle = if options.transform.is_noop() {
            subtitle_path.to_path_buf()
        } else {
            self.checkpoint()?;
            progress.emit(Stage::TransformingText, 10).await;
            let doc = SubtitleDocument::read_from_file(subtitle_path)
                .map_err(|e| PipelineError::at(Stage::TransformingText.label(), e))?;
            let transformed = text_transform::apply_transforms(&doc, options.transform);
            let path = transformed_subtitle_path(subtitle_path, &run_id);
            transformed
                .write_to_file(&path)
                .map_err(|e| PipelineError::at(Stage::TransformingText.label(), e))?;
            scratch.register(path.clone());
            path
        };

        self.checkpoint()?;
        progress.emit(Stage::CompilingStyle, 20).await;
        let style = style::compile(&options.style);

        let output_path = options
            .output_path
            .clone()
            .unwrap_or_else(|| default_burn_output_path(video_path));

        self.checkpoint()?;
        progress.emit(Stage::Burning, 30).await;
        MediaEngine::burn_subtitles(&BurnRequest {
            video_path: video_path.to_path_buf(),
            subtitle_path: burn_subtitle,
            style,
            quality: options.quality,
            preset: options.preset.clone(),
            output_path: output_path.clone(),
        })
        .await
        .map_err(|e| PipelineError::at(Stage::Burning.label(), e))?;

        Ok(output_path)
    }

    /// Generate subtitles for a video and immediately burn them in
    pub async fn generate_and_burn(
        &self,
        request: &GenerateRequest,
        options: &BurnOptions,
        progress: &ProgressReporter,
    ) -> Result<PathBuf, PipelineError> {
        self.generate_subtitles(request, progress).await?;
        self.burn(&request.video_path, &request.subtitle_path, options, progress)
            .await
    }

    /// Translate a subtitle file to a new file suffixed with the target
    /// language. A separate top-level operation, not part of the
    /// create-and-burn sequence.
    pub async fn translate(
        &self,
        subtitle_path: &Path,
        source: &str,
        target: &str,
        provider: &dyn TranslationProvider,
        progress: &ProgressReporter,
    ) -> Result<PathBuf, PipelineError> {
        self.checkpoint()?;
        progress.emit(Stage::Translating, 10).await;

        let output = translation::translate_file(
            subtitle_path,
            source,
            target,
            provider,
            translation::DEFAULT_CONCURRENT_REQUESTS,
        )
        .await
        .map_err(|e| PipelineError::at(Stage::Translating.label(), e))?;

        progress.emit(Stage::Done, 100).await;
        info!("Translated subtitles written to {}", output.display());
        Ok(output)
    }
}

/// Fresh run-scoped identifier for scratch file names
fn new_run_id() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..8].to_string()
}

/// Scratch WAV path for a run: `{stem}_temp.{run_id}.wav` next to the video.
/// The run id keeps concurrent runs over the same input from colliding.
pub fn scratch_audio_path(video_path: &Path, run_id: &str) -> PathBuf {
    let stem = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string());
    video_path.with_file_name(format!("{}_temp.{}.wav", stem, run_id))
}

/// Intermediate path for a transformed subtitle file:
/// `{stem}_modified.{run_id}.srt` next to the source
pub fn transformed_subtitle_path(subtitle_path: &Path, run_id: &str) -> PathBuf {
    let stem = subtitle_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "subtitles".to_string());
    subtitle_path.with_file_name(format!("{}_modified.{}.srt", stem, run_id))
}

/// Default output path for a burned video: `{stem}_subbed.mp4` next to the input
pub fn default_burn_output_path(video_path: &Path) -> PathBuf {
    let stem = video_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "video".to_string());
    video_path.with_file_name(format!("{}_subbed.mp4", stem))
}

/// Copy an existing file to a `.bak` sibling before it is overwritten.
/// Backup failure is logged and deliberately not propagated; losing the
/// backup must not abort the run that is about to produce fresh output.
pub fn backup_existing(path: &Path) {
    if !path.exists() {
        return;
    }

    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);

    match fs::copy(path, &backup) {
        Ok(_) => info!("Backed up {} to {}", path.display(), backup.display()),
        Err(e) => warn!("Failed to back up {}: {}", path.display(), e),
    }
}
