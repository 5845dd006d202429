/*!
 * Tests for language utility functions
 */

use submovies::language_utils::{
    get_language_name, language_codes_match, normalize_to_part1_or_part2t, normalize_to_part2t,
    prompt_language_label, validate_language_code, LanguageCodeType,
};

#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    assert_eq!(validate_language_code("fa").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("fas").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("per").unwrap(), LanguageCodeType::Part2B);

    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("persian").is_err());
}

#[test]
fn test_normalize_withEquivalentCodes_shouldAgree() {
    assert_eq!(normalize_to_part2t("fa").unwrap(), "fas");
    assert_eq!(normalize_to_part2t("per").unwrap(), "fas");
    assert_eq!(normalize_to_part1_or_part2t("fas").unwrap(), "fa");
    assert!(language_codes_match("fa", "per"));
    assert!(language_codes_match("ger", "de"));
    assert!(!language_codes_match("fa", "ar"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("fa").unwrap(), "Persian");
    assert_eq!(get_language_name("fre").unwrap(), "French");
}

#[test]
fn test_promptLanguageLabel_shouldCombineNameAndCode() {
    assert_eq!(prompt_language_label("FA"), "Persian (fa)");
    assert_eq!(prompt_language_label("Klingon"), "Klingon");
}
