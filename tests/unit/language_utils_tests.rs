/*!
 * Tests for language utility functions
 */

use linguaflow::language_utils::{
    base_code, get_language_name, is_auto, language_codes_match, normalize_to_part1_or_part2t,
    normalize_to_part2t, validate_language_code, validate_source_code, LanguageCodeType,
    SUPPORTED_LANGUAGES,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    assert!(matches!(validate_language_code("en").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("hi").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code("eng").unwrap(), LanguageCodeType::Part2T));
    assert!(matches!(validate_language_code("fre").unwrap(), LanguageCodeType::Part2B));

    // Regional tags reduce to their base language
    assert!(matches!(validate_language_code("en-US").unwrap(), LanguageCodeType::Part1));
    assert!(matches!(validate_language_code(" PT_br ").unwrap(), LanguageCodeType::Part1));

    // Invalid codes
    assert!(validate_language_code("xyz").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_autoCode_shouldOnlyBeValidAsSource() {
    assert!(is_auto("auto"));
    assert!(is_auto(" AUTO "));
    assert!(validate_source_code("auto").is_ok());
    assert!(validate_language_code("auto").is_err());
    assert!(validate_source_code("xyz").is_err());
}

#[test]
fn test_normalize_withVariousForms_shouldAgree() {
    assert_eq!(normalize_to_part2t("de").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
    assert_eq!(normalize_to_part1_or_part2t("spa").unwrap(), "es");
    assert_eq!(base_code("zh-Hant"), "zh");
}

#[test]
fn test_language_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("fr", "fre"));
    assert!(language_codes_match("en-GB", "eng"));
    assert!(!language_codes_match("en", "es"));
    assert!(!language_codes_match("auto", "en"));
}

#[test]
fn test_get_language_name_shouldReturnEnglishNames() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("hin").unwrap(), "Hindi");
    assert_eq!(get_language_name("auto").unwrap(), "Auto-detect");
    assert!(get_language_name("xyz").is_err());
}

#[test]
fn test_supportedLanguages_shouldAllBeValidAndUnique() {
    for code in SUPPORTED_LANGUAGES {
        assert!(validate_language_code(code).is_ok(), "{} should be valid", code);
    }
    let mut sorted = SUPPORTED_LANGUAGES.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), SUPPORTED_LANGUAGES.len());
}
