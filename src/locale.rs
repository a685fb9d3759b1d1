//! Holds the read-only locale the engine consults and the app's selectable languages.

use std::fmt;

/// The language used when a tag is empty or names the portable `C`/`POSIX` locale.
const FALLBACK_LANGUAGE: &str = "en";

/// Environment variables consulted for the locale, highest priority first (as POSIX does).
pub const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// A language tag such as `fa-IR` or `fa_IR.UTF-8`.
///
/// Only the primary language subtag matters to the date engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locale {
    tag: String,
}

impl Locale {
    /// Wrap a BCP 47 (`fa-IR`) or POSIX (`fa_IR.UTF-8@euro`) tag without validating it.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// The tag as given.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The lowercased primary language subtag (`"fa"` for `fa_IR.UTF-8`).
    pub fn language(&self) -> String {
        // `fa_IR.UTF-8@euro` -> `fa`
        let primary = self
            .tag
            .trim()
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default();

        if primary.is_empty() || primary == "C" || primary.eq_ignore_ascii_case("posix") {
            FALLBACK_LANGUAGE.to_owned()
        } else {
            primary.to_ascii_lowercase()
        }
    }

    /// Whether the language is Persian, the trigger for showing Jalali dates by default.
    pub fn is_persian(&self) -> bool {
        self.language() == Language::Persian.code()
    }

    /// Read the process locale from [`LOCALE_ENV_VARS`], skipping unset or empty values.
    ///
    /// The engine never calls this; drivers resolve the locale once and pass it down.
    pub fn from_env() -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.trim().is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(FALLBACK_LANGUAGE)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tag.fmt(f)
    }
}

impl From<&str> for Locale {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Language> for Locale {
    fn from(value: Language) -> Self {
        Self::new(value.code())
    }
}

/// Languages the app can be switched to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    Arabic,
    #[default]
    English,
    German,
    Japanese,
    Persian,
    Spanish,
    Turkish,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Self::Arabic,
        Self::English,
        Self::German,
        Self::Japanese,
        Self::Persian,
        Self::Spanish,
        Self::Turkish,
    ];

    /// ISO 639-1 code, also the stored preference value.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Arabic => "ar",
            Self::English => "en",
            Self::German => "de",
            Self::Japanese => "ja",
            Self::Persian => "fa",
            Self::Spanish => "es",
            Self::Turkish => "tr",
        }
    }

    /// Whether the language is written right to left.
    pub const fn is_rtl(&self) -> bool {
        matches!(self, Self::Arabic | Self::Persian)
    }

    /// Decode a stored code, falling back to [`Language::English`].
    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_subtag() {
        assert_eq!(Locale::new("fa").language(), "fa");
        assert_eq!(Locale::new("fa-IR").language(), "fa");
        assert_eq!(Locale::new("fa_IR.UTF-8").language(), "fa");
        assert_eq!(Locale::new("FA_ir").language(), "fa");
        assert_eq!(Locale::new("en_US.UTF-8@euro").language(), "en");
        assert_eq!(Locale::new("ar-u-ca-islamic").language(), "ar");
    }

    #[test]
    fn test_language_portable() {
        assert_eq!(Locale::new("").language(), "en");
        assert_eq!(Locale::new("C").language(), "en");
        assert_eq!(Locale::new("C.UTF-8").language(), "en");
        assert_eq!(Locale::new("POSIX").language(), "en");
    }

    #[test]
    fn test_is_persian() {
        assert!(Locale::new("fa-IR").is_persian());
        assert!(Locale::from(Language::Persian).is_persian());
        assert!(!Locale::new("en").is_persian());
        // a region alone does not make a locale Persian
        assert!(!Locale::new("en-IR").is_persian());
        assert!(!Locale::new("far").is_persian());
    }

    #[test]
    fn test_language_from_code() {
        assert_eq!(Language::from_code("fa"), Language::Persian);
        assert_eq!(Language::from_code("tr"), Language::Turkish);
        assert_eq!(Language::from_code("xx"), Language::English);
        assert_eq!(Language::from_code(""), Language::English);
    }

    #[test]
    fn test_language_rtl() {
        let rtl: Vec<_> = Language::ALL.into_iter().filter(Language::is_rtl).collect();
        assert_eq!(rtl, vec![Language::Arabic, Language::Persian]);
    }
}
