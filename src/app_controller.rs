/*!
 * Application controller.
 *
 * Sits between the CLI and the pipeline: builds run requests from the
 * configuration, spawns a drain task that renders the run's progress events
 * with indicatif, and maps results back to the command layer.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use tokio::sync::mpsc;

use crate::app_config::Config;
use crate::pipeline::{
    self, BurnOptions, GenerateRequest, Pipeline, ProgressEvent, ProgressReporter,
};
use crate::providers::{GoogleTranslate, TranslationProvider};
use crate::transcribe::EngineManager;

/// Main application controller
pub struct Controller {
    /// App configuration
    config: Config,

    /// Shared transcription engine manager
    engines: Arc<EngineManager>,
}

impl Controller {
    /// Create a controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let engines = Arc::new(EngineManager::with_default_cache_dir()?);
        Ok(Controller { config, engines })
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate a subtitle file for a video. The subtitle path defaults to
    /// the video path with an `.srt` extension.
    pub async fn run_generate(
        &self,
        video_path: PathBuf,
        subtitle_path: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let subtitle_path =
            subtitle_path.unwrap_or_else(|| default_subtitle_path(&video_path));
        let request = GenerateRequest {
            video_path,
            subtitle_path: subtitle_path.clone(),
            model: self.config.model()?,
            language: self.config.language_option(),
        };

        let pipeline = Pipeline::new(self.engines.clone());
        let (progress, rx) = ProgressReporter::channel();
        let drain = spawn_progress_bar(rx);

        let result = pipeline.generate_subtitles(&request, &progress).await;
        drop(progress);
        drain.await.ok();

        result?;
        Ok(subtitle_path)
    }

    /// Burn a subtitle file into a video. When no subtitle file is given,
    /// one is generated first and burned immediately.
    pub async fn run_burn(
        &self,
        video_path: PathBuf,
        subtitle_path: Option<PathBuf>,
        output_path: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let options = BurnOptions {
            output_path,
            style: self.config.style_spec(),
            transform: self.config.transform_options(),
            quality: self.config.video_quality,
            preset: self.config.video_preset.clone(),
        };

        let pipeline = Pipeline::new(self.engines.clone());
        let (progress, rx) = ProgressReporter::channel();
        let drain = spawn_progress_bar(rx);

        let result = match subtitle_path {
            Some(subtitle_path) => {
                pipeline
                    .burn(&video_path, &subtitle_path, &options, &progress)
                    .await
            }
            None => {
                let request = GenerateRequest {
                    video_path: video_path.clone(),
                    subtitle_path: default_subtitle_path(&video_path),
                    model: self.config.model()?,
                    language: self.config.language_option(),
                };
                pipeline.generate_and_burn(&request, &options, &progress).await
            }
        };
        drop(progress);
        drain.await.ok();

        Ok(result?)
    }

    /// Translate a subtitle file into the target language
    pub async fn run_translate(
        &self,
        subtitle_path: PathBuf,
        source: &str,
        target: &str,
    ) -> Result<PathBuf> {
        let provider = GoogleTranslate::new();

        let pipeline = Pipeline::new(self.engines.clone());
        let (progress, rx) = ProgressReporter::channel();
        let drain = spawn_progress_bar(rx);

        let result = pipeline
            .translate(&subtitle_path, source, target, &provider, &progress)
            .await;
        drop(progress);
        drain.await.ok();

        Ok(result?)
    }

    /// Catalog lines for every model with its downloaded state
    pub fn model_status_lines(&self) -> Vec<String> {
        self.engines
            .model_status()
            .into_iter()
            .map(|(model, downloaded)| {
                let marker = if downloaded { "downloaded" } else { "not downloaded" };
                format!("{} [{}]", model.info_line(), marker)
            })
            .collect()
    }

    /// Language codes the translation provider accepts
    pub fn supported_languages(&self) -> Vec<&'static str> {
        GoogleTranslate::new().supported_languages().to_vec()
    }
}

/// Subtitle path derived from a video path: same location, `.srt` extension
pub fn default_subtitle_path(video_path: &Path) -> PathBuf {
    video_path.with_extension("srt")
}

/// Drain progress events into an indicatif bar until the channel closes
fn spawn_progress_bar(mut rx: mpsc::Receiver<ProgressEvent>) -> tokio::task::JoinHandle<()> {
    let progress_bar = ProgressBar::new(100);
    let template = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(template.progress_chars("█▓▒░"));

    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            progress_bar.set_position(event.percent as u64);
            progress_bar.set_message(event.stage.label());
            if event.stage == pipeline::Stage::Done {
                info!("{}", event.stage.label());
            }
        }
        progress_bar.finish_and_clear();
    })
}
