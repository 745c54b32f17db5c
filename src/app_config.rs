/*!
 * Application configuration.
 *
 * A flat settings record covering subtitle styling, text transforms, the
 * transcription model and language, and video encode parameters. Loaded
 * from and saved to a JSON file in the user's home directory; a missing
 * file yields the documented defaults.
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};

use crate::style::StyleSpec;
use crate::text_transform::TransformOptions;
use crate::transcribe::ModelKind;

/// Settings file name under the config directory
const SETTINGS_FILE: &str = "settings.json";

/// Application settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Subtitle font size in points
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Subtitle font family
    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Subtitle text color name
    #[serde(default = "default_font_color")]
    pub font_color: String,

    /// Subtitle outline color name
    #[serde(default = "default_font_outline")]
    pub font_outline: String,

    /// Background box color name, "none" for no box
    #[serde(default = "default_background_color")]
    pub background_color: String,

    /// Upper-case subtitle text before burning
    #[serde(default)]
    pub uppercase: bool,

    /// Normalize whitespace in subtitle text before burning
    #[serde(default)]
    pub word_by_word: bool,

    /// Subtitle position, "bottom" or "top center"
    #[serde(default = "default_subtitle_position")]
    pub subtitle_position: String,

    /// Left margin in pixels
    #[serde(default = "default_margin_left")]
    pub margin_left: u32,

    /// Transcription model name
    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,

    /// Recognition language code, "auto" to detect
    #[serde(default = "default_whisper_language")]
    pub whisper_language: String,

    /// x264 CRF quality, lower is higher quality
    #[serde(default = "default_video_quality")]
    pub video_quality: u32,

    /// x264 speed preset
    #[serde(default = "default_video_preset")]
    pub video_preset: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_font_size() -> u32 {
    24
}

fn default_font_name() -> String {
    "Arial".to_string()
}

fn default_font_color() -> String {
    "white".to_string()
}

fn default_font_outline() -> String {
    "black".to_string()
}

fn default_background_color() -> String {
    "none".to_string()
}

fn default_subtitle_position() -> String {
    "bottom".to_string()
}

fn default_margin_left() -> u32 {
    50
}

fn default_whisper_model() -> String {
    "base".to_string()
}

fn default_whisper_language() -> String {
    "auto".to_string()
}

fn default_video_quality() -> u32 {
    23
}

fn default_video_preset() -> String {
    "medium".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            font_size: default_font_size(),
            font_name: default_font_name(),
            font_color: default_font_color(),
            font_outline: default_font_outline(),
            background_color: default_background_color(),
            uppercase: false,
            word_by_word: false,
            subtitle_position: default_subtitle_position(),
            margin_left: default_margin_left(),
            whisper_model: default_whisper_model(),
            whisper_language: default_whisper_language(),
            video_quality: default_video_quality(),
            video_preset: default_video_preset(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Default settings location: `~/.subburn/settings.json`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("No home directory available"))?;
        Ok(home.join(".subburn").join(SETTINGS_FILE))
    }

    /// Load settings from a file, falling back to defaults when the file
    /// does not exist. A file that exists but does not parse is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save settings as pretty-printed JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Sanity-check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.font_size == 0 {
            return Err(anyhow!("font_size must be positive"));
        }
        if self.video_quality > 51 {
            return Err(anyhow!(
                "video_quality must be a CRF between 0 and 51, got {}",
                self.video_quality
            ));
        }
        self.whisper_model.parse::<ModelKind>()?;
        Ok(())
    }

    /// The configured transcription model
    pub fn model(&self) -> Result<ModelKind> {
        self.whisper_model.parse()
    }

    /// The configured recognition language, None for auto-detection
    pub fn language_option(&self) -> Option<String> {
        if self.whisper_language == "auto" {
            None
        } else {
            Some(self.whisper_language.clone())
        }
    }

    /// Overlay style built from the configured values
    pub fn style_spec(&self) -> StyleSpec {
        StyleSpec {
            font_size: self.font_size,
            font_name: self.font_name.clone(),
            primary_color: self.font_color.clone(),
            outline_color: self.font_outline.clone(),
            background_color: self.background_color.clone(),
            position: self.subtitle_position.clone(),
            margin_left: self.margin_left,
            ..StyleSpec::default()
        }
    }

    /// Text transform flags from the configured values
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            uppercase: self.uppercase,
            word_by_word: self.word_by_word,
        }
    }
}

/// Log verbosity setting
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The corresponding log crate filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
