/*!
 * ISO language code helpers built on isolang.
 */

use anyhow::{anyhow, Result};
use isolang::Language;

/// Resolve a language identifier to an isolang entry. Accepts ISO 639-1
/// codes, ISO 639-3 codes, and English names.
fn resolve(code: &str) -> Option<Language> {
    let trimmed = code.trim();
    Language::from_639_1(&trimmed.to_lowercase())
        .or_else(|| Language::from_639_3(&trimmed.to_lowercase()))
        .or_else(|| Language::from_name(trimmed))
}

/// Normalize a language identifier to its two-letter ISO 639-1 code.
/// "auto" passes through untouched for the auto-detect case.
pub fn normalize_language_code(code: &str) -> Result<String> {
    if code.eq_ignore_ascii_case("auto") {
        return Ok("auto".to_string());
    }

    let language = resolve(code).ok_or_else(|| anyhow!("Unknown language code: {}", code))?;
    language
        .to_639_1()
        .map(|c| c.to_string())
        .ok_or_else(|| anyhow!("Language '{}' has no two-letter code", code))
}

/// English display name for a language identifier
pub fn get_language_name(code: &str) -> Result<String> {
    if code.eq_ignore_ascii_case("auto") {
        return Ok("Auto Detect".to_string());
    }

    let language = resolve(code).ok_or_else(|| anyhow!("Unknown language code: {}", code))?;
    Ok(language.to_name().to_string())
}

/// Whether two language identifiers name the same language, across 639-1
/// and 639-3 spellings
pub fn language_codes_match(a: &str, b: &str) -> bool {
    match (resolve(a), resolve(b)) {
        (Some(lang_a), Some(lang_b)) => lang_a == lang_b,
        _ => a.trim().eq_ignore_ascii_case(b.trim()),
    }
}
