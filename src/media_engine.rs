/*!
 * External media tool invocations.
 *
 * Wraps the two shapes of ffmpeg call the pipeline needs: extracting a
 * mono 16 kHz PCM track for transcription, and burning a styled subtitle
 * file into the picture stream. Both report failure through
 * [`ExternalToolError`] carrying filtered diagnostic output.
 */

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::{debug, error};
use tokio::process::Command;

use crate::errors::ExternalToolError;

/// How long an audio extraction may run before it is considered hung
const EXTRACT_TIMEOUT: Duration = Duration::from_secs(600);

/// Parameters for a burn invocation
#[derive(Debug, Clone)]
pub struct BurnRequest {
    /// Input video file
    pub video_path: PathBuf,

    /// Subtitle file to burn, possibly a transformed intermediate
    pub subtitle_path: PathBuf,

    /// Compiled `force_style` parameter block
    pub style: String,

    /// x264 CRF value, lower is higher quality
    pub quality: u32,

    /// x264 speed preset name
    pub preset: String,

    /// Output video file
    pub output_path: PathBuf,
}

/// ffmpeg front-end for the pipeline
pub struct MediaEngine;

impl MediaEngine {
    /// Extract the audio track as mono 16 kHz 16-bit PCM WAV.
    ///
    /// The transcription engine consumes exactly this format; anything else
    /// is rejected downstream.
    pub async fn extract_audio<P: AsRef<Path>>(video_path: P, audio_path: P) -> Result<()> {
        let video_path = video_path.as_ref();
        let audio_path = audio_path.as_ref();

        if !video_path.exists() {
            return Err(anyhow!("Video file does not exist: {}", video_path.display()));
        }

        debug!("Extracting audio from {}", video_path.display());

        let ffmpeg_future = Command::new("ffmpeg")
            .args([
                "-i",
                video_path.to_str().unwrap_or_default(),
                "-vn",
                "-acodec",
                "pcm_s16le",
                "-ar",
                "16000",
                "-ac",
                "1",
                audio_path.to_str().unwrap_or_default(),
                "-y",
            ])
            .output();

        let output = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| anyhow!("Failed to execute ffmpeg for audio extraction: {}", e))?
            },
            _ = tokio::time::sleep(EXTRACT_TIMEOUT) => {
                return Err(anyhow!("ffmpeg audio extraction timed out after {}s", EXTRACT_TIMEOUT.as_secs()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("Audio extraction failed: {}", filtered);
            return Err(ExternalToolError {
                tool: "ffmpeg".to_string(),
                status: output.status.to_string(),
                stderr: filtered,
            }
            .into());
        }

        Ok(())
    }

    /// Burn a subtitle file into a video with the compiled style applied.
    ///
    /// No timeout here: a long encode is indistinguishable from a hung one,
    /// and cancellation between stages is the supported way out.
    pub async fn burn_subtitles(request: &BurnRequest) -> Result<()> {
        let filter = format!(
            "subtitles='{}':force_style='{}'",
            escape_filter_path(&request.subtitle_path),
            request.style
        );

        debug!("Burning with filter: {}", filter);

        let output = Command::new("ffmpeg")
            .args([
                "-i",
                request.video_path.to_str().unwrap_or_default(),
                "-vf",
                &filter,
                "-c:v",
                "libx264",
                "-preset",
                &request.preset,
                "-crf",
                &request.quality.to_string(),
                "-c:a",
                "aac",
                "-b:a",
                "192k",
                request.output_path.to_str().unwrap_or_default(),
                "-y",
            ])
            .output()
            .await
            .map_err(|e| anyhow!("Failed to execute ffmpeg for burning: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("Subtitle burning failed: {}", filtered);
            return Err(ExternalToolError {
                tool: "ffmpeg".to_string(),
                status: output.status.to_string(),
                stderr: filtered,
            }
            .into());
        }

        Ok(())
    }
}

/// Escape a path for embedding inside an ffmpeg filter expression.
/// Backslashes become forward slashes and drive-letter colons are escaped,
/// which covers the Windows cases the filter parser trips over.
pub fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").replace(':', "\\:")
}

/// Reduce ffmpeg stderr to the lines that describe the actual failure,
/// dropping the version banner, build configuration, and stream metadata.
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "lib",
        "Input #",
        "Output #",
        "Metadata:",
        "Duration:",
        "Stream #",
        "Stream mapping:",
        "Press [q]",
        "frame=",
        "size=",
    ];

    let meaningful: Vec<&str> = stderr
        .lines()
        .map(|line| line.trim())
        .filter(|line| {
            !line.is_empty() && !noise_prefixes.iter().any(|p| line.starts_with(p))
        })
        .collect();

    if meaningful.is_empty() {
        "unknown ffmpeg error (stderr was empty after filtering)".to_string()
    } else {
        meaningful.join("\n")
    }
}
