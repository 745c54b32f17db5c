/*!
 * Tests for the SRT timestamp codec
 */

use subburn::errors::FormatError;
use subburn::timestamp::{format_timestamp, parse_timestamp};

#[test]
fn test_format_timestamp_withKnownValue_shouldMatchSpecExample() {
    assert_eq!(format_timestamp(3725.4).unwrap(), "01:02:05,400");
}

#[test]
fn test_format_timestamp_withZero_shouldProduceAllZeros() {
    assert_eq!(format_timestamp(0.0).unwrap(), "00:00:00,000");
}

#[test]
fn test_format_timestamp_withSubMillisecondFraction_shouldTruncate() {
    // 234.5 microseconds of extra precision are cut, not rounded up
    assert_eq!(format_timestamp(1.2345).unwrap(), "00:00:01,234");
}

#[test]
fn test_format_timestamp_withManyHours_shouldNotClampHours() {
    assert_eq!(format_timestamp(360_000.0).unwrap(), "100:00:00,000");
}

#[test]
fn test_format_timestamp_withNegativeValue_shouldFail() {
    assert!(matches!(
        format_timestamp(-1.0),
        Err(FormatError::NegativeTimestamp(_))
    ));
}

#[test]
fn test_parse_timestamp_withValidText_shouldReturnSeconds() {
    let seconds = parse_timestamp("01:02:05,400").unwrap();
    assert!((seconds - 3725.4).abs() < 0.001);
}

#[test]
fn test_parse_timestamp_withMalformedText_shouldFail() {
    for bad in [
        "1:02:03,400",    // single-digit hours
        "00:60:00,000",   // minutes out of range
        "00:00:61,000",   // seconds out of range
        "00:00:01.500",   // period instead of comma
        "00:00:01,50",    // truncated milliseconds
        "not a timestamp",
        "",
    ] {
        assert!(
            matches!(parse_timestamp(bad), Err(FormatError::MalformedTimestamp(_))),
            "expected '{}' to be rejected",
            bad
        );
    }
}

#[test]
fn test_roundtrip_withMillisecondPrecisionValues_shouldBeLossless() {
    for &seconds in &[0.0, 0.001, 1.5, 59.999, 61.25, 3599.5, 3725.4, 7322.007] {
        let encoded = format_timestamp(seconds).unwrap();
        let decoded = parse_timestamp(&encoded).unwrap();
        assert!(
            (decoded - seconds).abs() < 0.001,
            "roundtrip drifted for {}: {} -> {}",
            seconds,
            encoded,
            decoded
        );
    }
}
