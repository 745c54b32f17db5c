#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use subburn::app_config::{Config, LogLevel};
use subburn::app_controller::Controller;
use subburn::language_utils;

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an SRT subtitle file for a video by transcribing its audio
    Generate {
        /// Input video file
        video: PathBuf,

        /// Subtitle output path (defaults to the video path with .srt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Transcription model (tiny, base, small, medium, large)
        #[arg(short, long)]
        model: Option<String>,

        /// Spoken language code, or 'auto' to detect
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Burn subtitles into a video (generating them first if needed)
    Burn {
        /// Input video file
        video: PathBuf,

        /// Existing subtitle file to burn; omit to transcribe first
        #[arg(short, long)]
        subtitles: Option<PathBuf>,

        /// Output video path (defaults to {stem}_subbed.mp4)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Upper-case subtitle text
        #[arg(long)]
        uppercase: bool,

        /// Normalize whitespace in subtitle text
        #[arg(long)]
        word_by_word: bool,
    },

    /// Translate an SRT file into another language
    Translate {
        /// Subtitle file to translate
        subtitles: PathBuf,

        /// Source language code ('auto' to detect)
        #[arg(short, long, default_value = "auto")]
        source: String,

        /// Target language code
        #[arg(short, long)]
        target: String,
    },

    /// List transcription models and their downloaded state
    Models,

    /// List languages supported by the translation service
    Languages,

    /// Generate shell completions for subburn
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subburn - create, translate, and burn subtitles into videos
#[derive(Parser, Debug)]
#[command(name = "subburn")]
#[command(version = "0.1.0")]
#[command(about = "Subtitle creation, translation, and burn-in for videos")]
#[command(long_about = "subburn transcribes a video's audio with whisper models, writes the
result as an SRT file, optionally machine-translates it, and burns the
styled subtitles into the picture stream with ffmpeg.

EXAMPLES:
    subburn generate movie.mp4                    # Write movie.srt
    subburn generate -m small -l it movie.mp4     # Italian audio, small model
    subburn burn movie.mp4                        # Transcribe then burn
    subburn burn -s movie.srt movie.mp4           # Burn an existing file
    subburn translate -t it movie.srt             # Write movie_it.srt
    subburn models                                # Show the model catalog
    subburn completions bash > subburn.bash       # Shell completions")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Settings file path (defaults to ~/.subburn/settings.json)
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Stderr logger with timestamps and level coloring
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_code(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[0m",
            Level::Debug => "\x1B[2m",
            Level::Trace => "\x1B[2m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::color_code(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    // Completions need no config or logging at all
    if let Commands::Completions { shell } = &options.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subburn", &mut std::io::stdout());
        return Ok(());
    }

    let config_path = match &options.config_path {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let mut config =
        Config::load_or_default(&config_path).context("Failed to load configuration")?;

    let level = options
        .log_level
        .map(LogLevel::from)
        .unwrap_or(config.log_level)
        .to_level_filter();
    CustomLogger::init(level).ok();

    match options.command {
        Commands::Generate {
            video,
            output,
            model,
            language,
        } => {
            if let Some(model) = model {
                config.whisper_model = model;
            }
            if let Some(language) = language {
                config.whisper_language = language_utils::normalize_language_code(&language)?;
            }
            let controller = Controller::with_config(config.clone())?;
            let subtitle_path = controller.run_generate(video, output).await?;
            info!("Subtitles created: {}", subtitle_path.display());
        }
        Commands::Burn {
            video,
            subtitles,
            output,
            uppercase,
            word_by_word,
        } => {
            config.uppercase |= uppercase;
            config.word_by_word |= word_by_word;
            let controller = Controller::with_config(config.clone())?;
            let output_path = controller.run_burn(video, subtitles, output).await?;
            info!("Burned video created: {}", output_path.display());
        }
        Commands::Translate {
            subtitles,
            source,
            target,
        } => {
            let source = language_utils::normalize_language_code(&source)?;
            let target = language_utils::normalize_language_code(&target)?;
            let controller = Controller::with_config(config.clone())?;
            let output_path = controller
                .run_translate(subtitles, &source, &target)
                .await?;
            info!("Translated subtitles created: {}", output_path.display());
        }
        Commands::Models => {
            let controller = Controller::with_config(config.clone())?;
            for line in controller.model_status_lines() {
                println!("{}", line);
            }
        }
        Commands::Languages => {
            let controller = Controller::with_config(config.clone())?;
            for code in controller.supported_languages() {
                let name = language_utils::get_language_name(code)
                    .unwrap_or_else(|_| code.to_string());
                println!("{}  {}", code, name);
            }
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    // Settings are persisted at shutdown, mirroring load-at-startup
    if let Err(e) = config.save(&config_path) {
        debug!("Could not persist settings: {}", e);
    }

    Ok(())
}
