/*!
 * Subtitle document model.
 *
 * In-memory representation of an ordered SRT document: building one from
 * transcription segments, serializing it to SRT text, and parsing SRT text
 * back into entries.
 */

use std::fmt;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::errors::ParseError;
use crate::timestamp::{format_timestamp, parse_timestamp};
use crate::transcribe::Segment;

/// Single subtitle entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    /// Sequence number, 1-based and dense
    pub index: usize,

    /// Start time in seconds
    pub start: f64,

    /// End time in seconds
    pub end: f64,

    /// Subtitle text, may contain embedded line breaks
    pub text: String,
}

impl SubtitleEntry {
    /// Create a new subtitle entry
    pub fn new(index: usize, start: f64, end: f64, text: String) -> Self {
        SubtitleEntry {
            index,
            start,
            end,
            text,
        }
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Timing lines render via the codec; entries with negative times
        // cannot be constructed through the public builders
        let start = format_timestamp(self.start).map_err(|_| fmt::Error)?;
        let end = format_timestamp(self.end).map_err(|_| fmt::Error)?;
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", start, end)?;
        writeln!(f, "{}", self.text)
    }
}

/// Ordered collection of subtitle entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitleDocument {
    /// Entries in display order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleDocument {
    /// Create an empty document
    pub fn new() -> Self {
        SubtitleDocument {
            entries: Vec::new(),
        }
    }

    /// Build a document from transcription segments.
    ///
    /// Entries are numbered 1..N in input order and their text is trimmed of
    /// leading and trailing whitespace. Empty input yields an empty document.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = Segment>,
    {
        let entries = segments
            .into_iter()
            .enumerate()
            .map(|(i, seg)| SubtitleEntry::new(i + 1, seg.start, seg.end, seg.text.trim().to_string()))
            .collect();

        SubtitleDocument { entries }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the document to SRT text.
    ///
    /// Blocks are separated by exactly one blank line and the output ends with
    /// a single trailing newline. External players are strict about this
    /// discipline, so it must not drift.
    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse SRT text into a document.
    ///
    /// Blocks need at least an index line, a timing line, and one text line.
    /// Multi-line captions are joined with single spaces, so a parse of
    /// serialized output flattens them; callers that need the original line
    /// breaks must keep the source document.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let normalized = content.replace("\r\n", "\n");
        let mut entries = Vec::new();

        for (i, block) in normalized.trim().split("\n\n").enumerate() {
            if block.trim().is_empty() {
                continue;
            }
            let ordinal = i + 1;
            let lines: Vec<&str> = block.lines().collect();
            if lines.len() < 3 {
                return Err(ParseError::TruncatedBlock { ordinal });
            }

            let index: usize = lines[0]
                .trim()
                .parse()
                .map_err(|_| ParseError::InvalidIndexLine {
                    ordinal,
                    line: lines[0].to_string(),
                })?;

            let (start_text, end_text) = lines[1]
                .split_once("-->")
                .ok_or(ParseError::MissingTimestampLine { ordinal })?;
            let start = parse_timestamp(start_text)?;
            let end = parse_timestamp(end_text)?;

            let text = lines[2..].join(" ");
            entries.push(SubtitleEntry::new(index, start, end, text));
        }

        Ok(SubtitleDocument { entries })
    }

    /// Write the document to an SRT file, creating parent directories as needed
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;
        file.write_all(self.serialize().as_bytes())
            .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;

        debug!("Wrote {} subtitle entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Read and parse an SRT file
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;
        let doc = Self::parse(&content)
            .with_context(|| format!("Failed to parse subtitle file: {}", path.display()))?;
        Ok(doc)
    }
}
