/*!
 * Text transformations applied to subtitle documents before burning.
 */

use crate::subtitle_processor::{SubtitleDocument, SubtitleEntry};

/// Which transformations to apply to subtitle text
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformOptions {
    /// Upper-case every entry's text
    pub uppercase: bool,

    /// Re-join whitespace-split tokens with single spaces. Despite the name
    /// this does not compute per-word timing; it only normalizes whitespace,
    /// matching the historical behavior of the option.
    pub word_by_word: bool,
}

impl TransformOptions {
    /// True when no transformation is requested. The orchestrator skips the
    /// stage entirely in that case and produces no intermediate file.
    pub fn is_noop(&self) -> bool {
        !self.uppercase && !self.word_by_word
    }
}

/// Apply the selected transformations, yielding a new document.
///
/// Index, start, and end of every entry are carried over untouched; only
/// the text changes.
pub fn apply_transforms(doc: &SubtitleDocument, options: TransformOptions) -> SubtitleDocument {
    let entries = doc
        .entries
        .iter()
        .map(|entry| {
            let mut text = entry.text.clone();
            if options.uppercase {
                text = text.to_uppercase();
            }
            if options.word_by_word {
                text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            }
            SubtitleEntry::new(entry.index, entry.start, entry.end, text)
        })
        .collect();

    SubtitleDocument { entries }
}
