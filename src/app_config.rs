use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ConfigError;

/// Processing configuration module
/// This module holds the immutable processing configuration together with
/// the closed-form per-language limit tables (character caps and reading
/// speed caps). The tables are pure lookups: no I/O, no mutation.
///
/// Supported subtitle languages, in classifier candidate order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Chinese (zh)
    Chinese,
    /// English (en)
    English,
    /// Korean (ko)
    Korean,
    /// Japanese (ja)
    Japanese,
}

impl Language {
    /// All supported languages in declaration order. Classifier ties
    /// resolve to the earlier entry.
    pub const ALL: [Language; 4] = [
        Language::Chinese,
        Language::English,
        Language::Korean,
        Language::Japanese,
    ];

    /// ISO 639-1 code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Chinese => "zh",
            Self::English => "en",
            Self::Korean => "ko",
            Self::Japanese => "ja",
        }
    }

    /// Human-readable English name, resolved through isolang.
    pub fn display_name(&self) -> &'static str {
        isolang::Language::from_639_1(self.code())
            .map(|lang| lang.to_name())
            .unwrap_or("Unknown")
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "chinese" => Ok(Self::Chinese),
            "en" | "english" => Ok(Self::English),
            "ko" | "korean" => Ok(Self::Korean),
            "ja" | "japanese" => Ok(Self::Japanese),
            other => Err(ConfigError::UnknownLanguage(other.to_string())),
        }
    }
}

/// Target language selection: a concrete language or automatic detection.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageChoice {
    /// Detect the language from the document content
    #[default]
    Auto,
    /// Force a specific language
    Fixed(Language),
}

impl std::fmt::Display for LanguageChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Fixed(lang) => write!(f, "{}", lang),
        }
    }
}

impl FromStr for LanguageChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            other => Ok(Self::Fixed(other.parse()?)),
        }
    }
}

/// Content type for reading speed thresholds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Adult content (standard thresholds)
    #[default]
    Adult,
    /// Children's content (slower reading speeds)
    Children,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Adult => write!(f, "adult"),
            Self::Children => write!(f, "children"),
        }
    }
}

impl FromStr for ContentType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adult" => Ok(Self::Adult),
            "children" => Ok(Self::Children),
            other => Err(ConfigError::UnknownContentType(other.to_string())),
        }
    }
}

/// Immutable configuration for a processing run.
///
/// Cloning with a substituted language (for bilingual blocks) goes through
/// [`ProcessingConfig::with_language`]; the caller's value is never mutated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProcessingConfig {
    /// Target language, or auto-detection
    pub language: LanguageChoice,

    /// Content type used by the reading-speed tables
    #[serde(default)]
    pub content_type: ContentType,

    /// SDH mode raises some character/speed limits
    #[serde(default)]
    pub sdh_mode: bool,

    /// Remove SDH-only blocks and clean SDH markers from mixed blocks
    #[serde(default = "default_true")]
    pub remove_sdh: bool,

    /// Disable reading-speed validation
    #[serde(default)]
    pub no_speed_check: bool,

    /// Disable terminal punctuation repair (Chinese/Korean/Japanese)
    #[serde(default)]
    pub no_punct_fix: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            language: LanguageChoice::Auto,
            content_type: ContentType::Adult,
            sdh_mode: false,
            remove_sdh: true,
            no_speed_check: false,
            no_punct_fix: false,
        }
    }
}

impl ProcessingConfig {
    /// New config with the language replaced, everything else kept.
    /// Used to re-target a single run of a bilingual block.
    pub fn with_language(&self, language: Language) -> Self {
        Self {
            language: LanguageChoice::Fixed(language),
            ..self.clone()
        }
    }

    /// Per-line character limit for a language.
    ///
    /// SDH mode allows slightly longer CJK lines.
    pub fn character_limit(&self, language: Language) -> usize {
        match language {
            Language::Chinese => {
                if self.sdh_mode {
                    18
                } else {
                    16
                }
            }
            Language::English => 42,
            Language::Korean => 16,
            Language::Japanese => {
                if self.sdh_mode {
                    16
                } else {
                    13
                }
            }
        }
    }

    /// Reading-speed limit in characters per second for a language and
    /// the configured content type.
    pub fn reading_speed_limit(&self, language: Language) -> f64 {
        match (language, self.content_type) {
            (Language::Chinese, ContentType::Adult) => 9.0,
            (Language::Chinese, ContentType::Children) => 7.0,
            (Language::English, ContentType::Adult) => 20.0,
            (Language::English, ContentType::Children) => 17.0,
            (Language::Korean, ContentType::Adult) => 12.0,
            (Language::Korean, ContentType::Children) => 9.0,
            // Japanese limits do not vary by content type
            (Language::Japanese, _) => {
                if self.sdh_mode {
                    7.0
                } else {
                    4.0
                }
            }
        }
    }
}
