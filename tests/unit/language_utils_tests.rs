/*!
 * Tests for language code helpers
 */

use subglot::language_utils::{language_codes_match, language_display_name};

/// Test display names for known codes
#[test]
fn test_languageDisplayName_withKnownCodes_shouldReturnNames() {
    assert_eq!(language_display_name("ja"), "Japanese");
    assert_eq!(language_display_name("jpn"), "Japanese");
    assert_eq!(language_display_name("EN"), "English");
    assert_eq!(language_display_name("eng"), "English");
}

/// Unknown codes pass through unchanged
#[test]
fn test_languageDisplayName_withUnknownCode_shouldPassThrough() {
    assert_eq!(language_display_name("xx"), "xx");
}

/// Test matching across the 639-1 / 639-2 split
#[test]
fn test_languageCodesMatch_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("ja", "jpn"));
    assert!(language_codes_match("jpn", "ja"));
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("JA", "ja"));
    assert!(language_codes_match("ja", "ja"));
}

/// Different languages and unknown codes never match loosely
#[test]
fn test_languageCodesMatch_withDifferentLanguages_shouldNotMatch() {
    assert!(!language_codes_match("ja", "en"));
    assert!(!language_codes_match("xx", "yy"));
    assert!(language_codes_match("xx", "xx"));
}
