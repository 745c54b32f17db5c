/*!
 * # subburn
 *
 * A Rust library for turning a video into a subtitled video.
 *
 * ## Features
 *
 * - Extract audio and transcribe it with whisper models
 * - Build, serialize, and parse SRT subtitle documents
 * - Translate subtitle files while preserving numbering and timing
 * - Compile overlay styles and burn subtitles into the picture stream
 * - Staged pipeline with progress reporting and cooperative cancellation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `timestamp`: SRT timestamp codec
 * - `subtitle_processor`: Subtitle document model and SRT serialization
 * - `text_transform`: Case and whitespace transformations
 * - `style`: Overlay style compilation for the burn step
 * - `transcribe`: Speech engine boundary, whisper implementation, model catalog
 * - `providers`: Translation service clients
 * - `translation`: Order-preserving document translation
 * - `media_engine`: ffmpeg invocations for extraction and burning
 * - `pipeline`: Stage orchestration, progress events, cleanup
 * - `app_controller`: CLI-facing run driver
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod media_engine;
pub mod pipeline;
pub mod providers;
pub mod style;
pub mod subtitle_processor;
pub mod text_transform;
pub mod timestamp;
pub mod transcribe;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{
    ExternalToolError, FormatError, ModelError, ParseError, PipelineError, ProviderError,
    TranslationError,
};
pub use pipeline::{BurnOptions, GenerateRequest, Pipeline, ProgressEvent, ProgressReporter};
pub use style::StyleSpec;
pub use subtitle_processor::{SubtitleDocument, SubtitleEntry};
pub use text_transform::TransformOptions;
pub use transcribe::{EngineManager, ModelKind, Segment};
