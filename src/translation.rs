/*!
 * Subtitle document translation stage.
 *
 * Walks a parsed document and translates every entry's text while keeping
 * numbering and timing untouched. Entries are independent, so calls are
 * dispatched concurrently with a bounded width; results are reassembled in
 * document order no matter which calls finish first.
 */

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use log::info;

use crate::errors::TranslationError;
use crate::providers::TranslationProvider;
use crate::subtitle_processor::{SubtitleDocument, SubtitleEntry};

/// Bounded width for concurrent per-entry translation calls
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 4;

/// Translate a document entry by entry, yielding a new document.
///
/// Embedded line breaks are joined with single spaces before the text is
/// handed to the provider. Index, start, and end carry over unchanged. If
/// any entry fails, the whole document is discarded and the failing entry
/// is named in the error.
pub async fn translate_document(
    doc: &SubtitleDocument,
    source: &str,
    target: &str,
    provider: &dyn TranslationProvider,
    concurrency: usize,
) -> Result<SubtitleDocument, TranslationError> {
    let width = concurrency.max(1);

    let entries: Vec<SubtitleEntry> = stream::iter(doc.entries.iter().map(|entry| {
        let text = entry.text.lines().collect::<Vec<_>>().join(" ");
        async move {
            let translated = provider
                .translate(&text, source, target)
                .await
                .map_err(|e| TranslationError::Entry {
                    index: entry.index,
                    source: e,
                })?;
            Ok::<_, TranslationError>(SubtitleEntry::new(
                entry.index,
                entry.start,
                entry.end,
                translated,
            ))
        }
    }))
    // buffered preserves submission order, so out-of-order completions
    // cannot reorder the output document
    .buffered(width)
    .try_collect()
    .await?;

    Ok(SubtitleDocument { entries })
}

/// Translate a subtitle file to a sibling suffixed with the target language.
///
/// `movie.srt` translated to Italian lands at `movie_it.srt`; the input is
/// never overwritten.
pub async fn translate_file(
    input: &Path,
    source: &str,
    target: &str,
    provider: &dyn TranslationProvider,
    concurrency: usize,
) -> Result<PathBuf> {
    let doc = SubtitleDocument::read_from_file(input)?;
    info!(
        "Translating {} entries from '{}' to '{}'",
        doc.len(),
        source,
        target
    );

    let translated = translate_document(&doc, source, target, provider, concurrency)
        .await
        .with_context(|| format!("Failed to translate {}", input.display()))?;

    let output = translated_output_path(input, target)?;
    translated.write_to_file(&output)?;
    Ok(output)
}

/// Derive the output path for a translated subtitle file
pub fn translated_output_path(input: &Path, target: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| anyhow!("Subtitle path has no file name: {}", input.display()))?;
    let extension = input
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "srt".to_string());

    let file_name = format!("{}_{}.{}", stem.to_string_lossy(), target, extension);
    Ok(input.with_file_name(file_name))
}
