/*!
 * Error types for the subburn application.
 *
 * This module contains custom error types for different parts of the pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the timestamp codec
#[derive(Error, Debug)]
pub enum FormatError {
    /// Subtitle timestamps cannot represent time before zero
    #[error("negative timestamp: {0}")]
    NegativeTimestamp(f64),

    /// Text did not match the HH:MM:SS,mmm pattern
    #[error("malformed timestamp '{0}', expected HH:MM:SS,mmm")]
    MalformedTimestamp(String),
}

/// Errors produced while parsing subtitle file text
#[derive(Error, Debug)]
pub enum ParseError {
    /// A block must carry an index line, a timestamp line, and at least one text line
    #[error("subtitle block {ordinal} has fewer than 3 lines")]
    TruncatedBlock {
        /// 1-based position of the block in the file
        ordinal: usize,
    },

    /// The first line of a block was not a sequence number
    #[error("subtitle block {ordinal} has an invalid index line '{line}'")]
    InvalidIndexLine {
        /// 1-based position of the block in the file
        ordinal: usize,
        /// The offending line
        line: String,
    },

    /// The second line of a block was missing the `-->` separator
    #[error("subtitle block {ordinal} has no timestamp line")]
    MissingTimestampLine {
        /// 1-based position of the block in the file
        ordinal: usize,
    },

    /// A timestamp on the block's timing line failed to decode
    #[error("timestamp error: {0}")]
    Timestamp(#[from] FormatError),
}

/// Error from an external media tool invocation (ffmpeg)
#[derive(Error, Debug)]
#[error("{tool} exited with {status}: {stderr}")]
pub struct ExternalToolError {
    /// Name of the tool that failed
    pub tool: String,
    /// Exit status description
    pub status: String,
    /// Captured diagnostic output, filtered of banner noise
    pub stderr: String,
}

/// Errors that can occur when loading or using a speech recognition model
#[derive(Error, Debug)]
pub enum ModelError {
    /// The model weights could not be loaded into the engine
    #[error("failed to load model '{model}': {reason}")]
    LoadFailed {
        /// Model identifier
        model: String,
        /// Engine-reported reason
        reason: String,
    },

    /// Not enough free disk space for a model download
    #[error("insufficient disk space for model '{model}': need {required} bytes, {available} available")]
    InsufficientDiskSpace {
        /// Model identifier
        model: String,
        /// Bytes needed, including headroom
        required: u64,
        /// Bytes currently free at the cache location
        available: u64,
    },

    /// Downloading the model weights failed
    #[error("failed to download model '{model}': {reason}")]
    DownloadFailed {
        /// Model identifier
        model: String,
        /// Underlying failure
        reason: String,
    },

    /// The extracted audio file could not be read or had the wrong format
    #[error("unusable audio input {path}: {reason}")]
    BadAudio {
        /// Path to the rejected audio file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// The engine failed mid-transcription
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
}

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("failed to parse response: {0}")]
    ResponseParse(String),

    /// Error returned by the service itself
    #[error("service responded with {status_code}: {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the service
        message: String,
    },

    /// The requested language is not supported by the provider
    #[error("unsupported language '{0}'")]
    UnsupportedLanguage(String),
}

/// Errors that can occur during the translation stage
#[derive(Error, Debug)]
pub enum TranslationError {
    /// A single entry's translation call failed; the whole document is discarded
    #[error("translation of entry {index} failed: {source}")]
    Entry {
        /// Index of the subtitle entry that failed
        index: usize,
        /// The provider failure
        source: ProviderError,
    },

    /// Error from the provider outside any particular entry
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// A pipeline run failure, naming the stage that failed and the cause
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A stage aborted the run
    #[error("{stage} failed: {cause}")]
    Stage {
        /// Human-readable label of the failing stage
        stage: &'static str,
        /// The underlying error
        cause: anyhow::Error,
    },

    /// The run was cancelled between stages
    #[error("run cancelled")]
    Cancelled,
}

impl PipelineError {
    /// Wrap a stage failure with its stage label
    pub fn at(stage: &'static str, cause: anyhow::Error) -> Self {
        Self::Stage { stage, cause }
    }

    /// Label of the failing stage, if the run got that far
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            PipelineError::Stage { stage, .. } => Some(stage),
            PipelineError::Cancelled => None,
        }
    }
}
