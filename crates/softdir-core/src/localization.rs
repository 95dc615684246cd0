//! Localized descriptions and the language fallback rules shared by every
//! consumer of the catalog.
//!
//! Two languages are supported, `zh-CN` and `en`. A description lookup walks
//! requested language → the other language → legacy single description →
//! nothing, so a resource never renders as "no description" while any text
//! for it exists.
//!
//! ```rust
//! use softdir_core::localization::{resolve, Language, LocalizedDescription};
//!
//! let descriptions = LocalizedDescription::new(Some("中文说明".into()), None);
//! assert_eq!(
//!     resolve(descriptions.as_ref(), None, Language::En),
//!     Some("中文说明")
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Simplified Chinese. Also the language of the unsuffixed default readme.
    #[serde(rename = "zh-CN")]
    ZhCn,
    /// English.
    #[serde(rename = "en")]
    En,
}

impl Language {
    /// All supported languages, in priority order.
    pub const ALL: [Self; 2] = [Self::ZhCn, Self::En];

    /// Language assumed for content that carries no explicit language tag.
    pub const DEFAULT: Self = Self::ZhCn;

    /// The language code used in JSON keys and file suffixes.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ZhCn => "zh-CN",
            Self::En => "en",
        }
    }

    /// The other supported language, used as the first fallback.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::ZhCn => Self::En,
            Self::En => Self::ZhCn,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh-cn" | "zh" | "zh_cn" => Ok(Self::ZhCn),
            "en" | "en-us" | "en_us" => Ok(Self::En),
            other => Err(format!("unsupported language '{other}' (expected zh-CN or en)")),
        }
    }
}

/// Per-language description text.
///
/// Empty strings are never stored; a description with no entries is
/// represented as `None` by the constructors rather than as an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedDescription {
    /// Simplified Chinese text.
    #[serde(rename = "zh-CN", default, skip_serializing_if = "Option::is_none")]
    pub zh_cn: Option<String>,
    /// English text.
    #[serde(rename = "en", default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl LocalizedDescription {
    /// Build a description, returning `None` when neither language has text.
    #[must_use]
    pub fn new(zh_cn: Option<String>, en: Option<String>) -> Option<Self> {
        let description = Self {
            zh_cn: zh_cn.filter(|s| !s.is_empty()),
            en: en.filter(|s| !s.is_empty()),
        };
        (!description.is_empty()).then_some(description)
    }

    /// Text for exactly `language`, without fallback.
    #[must_use]
    pub fn get(&self, language: Language) -> Option<&str> {
        let value = match language {
            Language::ZhCn => self.zh_cn.as_deref(),
            Language::En => self.en.as_deref(),
        };
        value.filter(|s| !s.is_empty())
    }

    /// Whether no language has text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Language::ALL.iter().all(|&lang| self.get(lang).is_none())
    }

    /// Merge two descriptions language by language, preferring `overlay`.
    ///
    /// A version that only ships a Chinese readme keeps inheriting the
    /// software's English text.
    #[must_use]
    pub fn overlay(overlay: Option<&Self>, base: Option<&Self>) -> Option<Self> {
        let pick = |lang: Language| {
            overlay
                .and_then(|d| d.get(lang))
                .or_else(|| base.and_then(|d| d.get(lang)))
                .map(str::to_owned)
        };
        Self::new(pick(Language::ZhCn), pick(Language::En))
    }
}

/// Resolve the description to show for `language`.
///
/// Order: requested language, other language, `legacy`, absent. Empty
/// strings are treated as missing at every step.
#[must_use]
pub fn resolve<'a>(
    descriptions: Option<&'a LocalizedDescription>,
    legacy: Option<&'a str>,
    language: Language,
) -> Option<&'a str> {
    descriptions
        .and_then(|d| d.get(language).or_else(|| d.get(language.other())))
        .or_else(|| legacy.filter(|s| !s.is_empty()))
}
