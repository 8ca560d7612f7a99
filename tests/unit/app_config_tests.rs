/*!
 * Tests for processing configuration and the per-language limit tables
 */

use srtproc::{ContentType, Language, LanguageChoice, ProcessingConfig};

/// Test language code round-trip through FromStr
#[test]
fn test_language_parsing_withCodesAndNames_shouldResolve() {
    assert_eq!("zh".parse::<Language>().unwrap(), Language::Chinese);
    assert_eq!("english".parse::<Language>().unwrap(), Language::English);
    assert_eq!("KO".parse::<Language>().unwrap(), Language::Korean);
    assert_eq!("Japanese".parse::<Language>().unwrap(), Language::Japanese);
    assert!("klingon".parse::<Language>().is_err());
}

/// Test language choice parsing including the auto sentinel
#[test]
fn test_language_choice_parsing_withAuto_shouldReturnAuto() {
    assert_eq!("auto".parse::<LanguageChoice>().unwrap(), LanguageChoice::Auto);
    assert_eq!(
        "en".parse::<LanguageChoice>().unwrap(),
        LanguageChoice::Fixed(Language::English)
    );
}

/// Test display formatting of languages and choices
#[test]
fn test_language_display_withAllVariants_shouldUseIsoCodes() {
    assert_eq!(Language::Chinese.to_string(), "zh");
    assert_eq!(Language::English.code(), "en");
    assert_eq!(LanguageChoice::Auto.to_string(), "auto");
    assert_eq!(LanguageChoice::Fixed(Language::Korean).to_string(), "ko");
}

/// Test the character limit table, including SDH adjustments
#[test]
fn test_character_limit_withAllLanguages_shouldMatchTable() {
    let config = ProcessingConfig::default();
    assert_eq!(config.character_limit(Language::Chinese), 16);
    assert_eq!(config.character_limit(Language::English), 42);
    assert_eq!(config.character_limit(Language::Korean), 16);
    assert_eq!(config.character_limit(Language::Japanese), 13);

    let sdh = ProcessingConfig {
        sdh_mode: true,
        ..ProcessingConfig::default()
    };
    assert_eq!(sdh.character_limit(Language::Chinese), 18);
    assert_eq!(sdh.character_limit(Language::English), 42);
    assert_eq!(sdh.character_limit(Language::Japanese), 16);
}

/// Test the reading speed table across content types
#[test]
fn test_reading_speed_limit_withContentTypes_shouldMatchTable() {
    let adult = ProcessingConfig::default();
    assert_eq!(adult.reading_speed_limit(Language::Chinese), 9.0);
    assert_eq!(adult.reading_speed_limit(Language::English), 20.0);
    assert_eq!(adult.reading_speed_limit(Language::Korean), 12.0);
    assert_eq!(adult.reading_speed_limit(Language::Japanese), 4.0);

    let children = ProcessingConfig {
        content_type: ContentType::Children,
        ..ProcessingConfig::default()
    };
    assert_eq!(children.reading_speed_limit(Language::Chinese), 7.0);
    assert_eq!(children.reading_speed_limit(Language::English), 17.0);
    assert_eq!(children.reading_speed_limit(Language::Korean), 9.0);
    // Japanese ignores content type
    assert_eq!(children.reading_speed_limit(Language::Japanese), 4.0);
}

/// Test that with_language pins the language without touching other fields
#[test]
fn test_with_language_withAutoConfig_shouldPinLanguageOnly() {
    let config = ProcessingConfig {
        no_punct_fix: true,
        ..ProcessingConfig::default()
    };
    let pinned = config.with_language(Language::Korean);
    assert_eq!(pinned.language, LanguageChoice::Fixed(Language::Korean));
    assert!(pinned.no_punct_fix);
    assert!(pinned.remove_sdh);
    // Original is untouched
    assert_eq!(config.language, LanguageChoice::Auto);
}

/// Test serde round-trip of a full configuration
#[test]
fn test_config_serde_withFullConfig_shouldRoundTrip() {
    let config = ProcessingConfig {
        language: LanguageChoice::Fixed(Language::Japanese),
        content_type: ContentType::Children,
        sdh_mode: true,
        remove_sdh: false,
        no_speed_check: true,
        no_punct_fix: false,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: ProcessingConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
