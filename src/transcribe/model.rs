/*!
 * Speech model catalog and weight management.
 *
 * Knows which whisper models exist, how large they are, where their ggml
 * weights live on disk, and how to fetch them. Downloads are guarded by a
 * free-space check so a half-written multi-gigabyte file never lands on a
 * full disk.
 */

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::anyhow;
use indicatif::HumanBytes;
use log::info;

use crate::errors::ModelError;

/// Extra disk headroom required beyond the raw model size
const DISK_HEADROOM_NUM: u64 = 6;
const DISK_HEADROOM_DEN: u64 = 5;

/// Base URL for ggml whisper weights
const MODEL_BASE_URL: &str = "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

/// Available transcription model sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Tiny,
    Base,
    Small,
    Medium,
    Large,
}

impl ModelKind {
    /// All models, smallest first
    pub fn all() -> [ModelKind; 5] {
        [
            ModelKind::Tiny,
            ModelKind::Base,
            ModelKind::Small,
            ModelKind::Medium,
            ModelKind::Large,
        ]
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Tiny => "tiny",
            ModelKind::Base => "base",
            ModelKind::Small => "small",
            ModelKind::Medium => "medium",
            ModelKind::Large => "large",
        }
    }

    /// Approximate download size in bytes
    pub fn download_size(&self) -> u64 {
        match self {
            ModelKind::Tiny => 150_000_000,
            ModelKind::Base => 400_000_000,
            ModelKind::Small => 1_000_000_000,
            ModelKind::Medium => 3_000_000_000,
            ModelKind::Large => 6_000_000_000,
        }
    }

    /// One-line speed/accuracy tradeoff description
    pub fn description(&self) -> &'static str {
        match self {
            ModelKind::Tiny => "Fastest, least accurate",
            ModelKind::Base => "Fast, decent accuracy",
            ModelKind::Small => "Balanced speed/accuracy",
            ModelKind::Medium => "Slower, more accurate",
            ModelKind::Large => "Slowest, most accurate",
        }
    }

    /// Weight file name inside the cache directory. "large" is an alias for
    /// the current large-v3 weights.
    pub fn file_name(&self) -> &'static str {
        match self {
            ModelKind::Tiny => "ggml-tiny.bin",
            ModelKind::Base => "ggml-base.bin",
            ModelKind::Small => "ggml-small.bin",
            ModelKind::Medium => "ggml-medium.bin",
            ModelKind::Large => "ggml-large-v3.bin",
        }
    }

    /// Download URL for the weight file
    pub fn download_url(&self) -> String {
        format!("{}/{}", MODEL_BASE_URL, self.file_name())
    }

    /// Path of the weight file under a cache directory
    pub fn weights_path(&self, cache_dir: &Path) -> PathBuf {
        cache_dir.join(self.file_name())
    }

    /// Whether the weights are already present in the cache
    pub fn is_downloaded(&self, cache_dir: &Path) -> bool {
        self.weights_path(cache_dir).exists()
    }

    /// Formatted catalog line: name, size, description
    pub fn info_line(&self) -> String {
        format!(
            "{} ({}) - {}",
            self.name(),
            HumanBytes(self.download_size()),
            self.description()
        )
    }

    /// Make sure the weights exist locally, downloading them if needed.
    ///
    /// Checks free space at the cache location before starting a download
    /// and fails with [`ModelError::InsufficientDiskSpace`] when the model
    /// plus headroom would not fit.
    pub async fn ensure_available(&self, cache_dir: &Path) -> Result<PathBuf, ModelError> {
        let path = self.weights_path(cache_dir);
        if path.exists() {
            return Ok(path);
        }

        fs::create_dir_all(cache_dir).map_err(|e| ModelError::DownloadFailed {
            model: self.name().to_string(),
            reason: format!("cannot create cache directory: {}", e),
        })?;

        let required = self.download_size() * DISK_HEADROOM_NUM / DISK_HEADROOM_DEN;
        let available = fs2::available_space(cache_dir).map_err(|e| ModelError::DownloadFailed {
            model: self.name().to_string(),
            reason: format!("cannot determine free disk space: {}", e),
        })?;
        if available < required {
            return Err(ModelError::InsufficientDiskSpace {
                model: self.name().to_string(),
                required,
                available,
            });
        }

        info!(
            "Downloading model '{}' ({}) to {}",
            self.name(),
            HumanBytes(self.download_size()),
            path.display()
        );
        download_to(&self.download_url(), &path)
            .await
            .map_err(|e| ModelError::DownloadFailed {
                model: self.name().to_string(),
                reason: e.to_string(),
            })?;

        Ok(path)
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModelKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tiny" => Ok(ModelKind::Tiny),
            "base" => Ok(ModelKind::Base),
            "small" => Ok(ModelKind::Small),
            "medium" => Ok(ModelKind::Medium),
            "large" => Ok(ModelKind::Large),
            _ => Err(anyhow!("Unknown model '{}'", s)),
        }
    }
}

/// Stream a URL to a file. Writes to a `.part` sibling first so an
/// interrupted download never masquerades as complete weights.
async fn download_to(url: &str, dest: &Path) -> anyhow::Result<()> {
    let partial = dest.with_extension("bin.part");

    let mut response = reqwest::get(url).await?.error_for_status()?;
    let mut file = File::create(&partial)?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)?;
    }
    file.flush()?;
    drop(file);

    fs::rename(&partial, dest)?;
    Ok(())
}
