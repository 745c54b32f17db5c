/*!
 * SRT timestamp codec.
 *
 * Converts floating-point seconds to and from the `HH:MM:SS,mmm` text format
 * used by SRT timing lines. The comma millisecond separator is mandatory.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::FormatError;

/// Timestamp pattern. Hours are at least two digits but unbounded,
/// minutes and seconds are clamped to 00-59 by the pattern itself.
static TIMESTAMP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2,}):([0-5]\d):([0-5]\d),(\d{3})$").unwrap());

/// Format a seconds value as an SRT timestamp.
///
/// Milliseconds are truncated from the rounded microsecond count rather than
/// rounded directly, so `3725.4` formats as `01:02:05,400` while `1.2345`
/// formats as `00:00:01,234`.
pub fn format_timestamp(seconds: f64) -> Result<String, FormatError> {
    if seconds < 0.0 || !seconds.is_finite() {
        return Err(FormatError::NegativeTimestamp(seconds));
    }

    let mut whole = seconds.trunc() as u64;
    let mut micros = (seconds.fract() * 1_000_000.0).round() as u64;
    if micros >= 1_000_000 {
        whole += 1;
        micros -= 1_000_000;
    }

    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    let millis = micros / 1_000;

    Ok(format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis))
}

/// Parse an SRT timestamp back into seconds.
///
/// Fails with [`FormatError::MalformedTimestamp`] if the text does not match
/// the `HH:MM:SS,mmm` pattern.
pub fn parse_timestamp(text: &str) -> Result<f64, FormatError> {
    let caps = TIMESTAMP_REGEX
        .captures(text.trim())
        .ok_or_else(|| FormatError::MalformedTimestamp(text.to_string()))?;

    // The pattern only admits digits, so these parses cannot fail
    let hours: u64 = caps[1].parse().unwrap_or(0);
    let minutes: u64 = caps[2].parse().unwrap_or(0);
    let seconds: u64 = caps[3].parse().unwrap_or(0);
    let millis: u64 = caps[4].parse().unwrap_or(0);

    Ok((hours * 3600 + minutes * 60 + seconds) as f64 + millis as f64 / 1000.0)
}
