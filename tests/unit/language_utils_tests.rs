/*!
 * Tests for language code utilities
 */

use subburn::language_utils::{
    get_language_name, language_codes_match, normalize_language_code,
};

#[test]
fn test_normalize_language_code_withTwoLetterCode_shouldPassThrough() {
    assert_eq!(normalize_language_code("en").unwrap(), "en");
    assert_eq!(normalize_language_code("IT").unwrap(), "it");
}

#[test]
fn test_normalize_language_code_withThreeLetterCode_shouldShorten() {
    assert_eq!(normalize_language_code("eng").unwrap(), "en");
    assert_eq!(normalize_language_code("fra").unwrap(), "fr");
}

#[test]
fn test_normalize_language_code_withAuto_shouldPassThrough() {
    assert_eq!(normalize_language_code("auto").unwrap(), "auto");
    assert_eq!(normalize_language_code("AUTO").unwrap(), "auto");
}

#[test]
fn test_normalize_language_code_withUnknownCode_shouldFail() {
    assert!(normalize_language_code("zz").is_err());
    assert!(normalize_language_code("").is_err());
}

#[test]
fn test_get_language_name_withKnownCodes_shouldReturnEnglishName() {
    assert_eq!(get_language_name("it").unwrap(), "Italian");
    assert_eq!(get_language_name("de").unwrap(), "German");
    assert_eq!(get_language_name("auto").unwrap(), "Auto Detect");
}

#[test]
fn test_language_codes_match_withEquivalentSpellings_shouldMatch() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("EN", "en"));
    assert!(!language_codes_match("en", "it"));
}
