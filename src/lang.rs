//! Language code helpers: sanitizing codes and classifying writing direction

use std::fmt;

/// Base subtags of languages written right-to-left
const RTL_LANGUAGES: &[&str] = &[
    "ar", // Arabic
    "fa", // Persian
    "he", // Hebrew
    "iw", // Hebrew (legacy code)
    "ur", // Urdu
    "yi", // Yiddish
];

/// Writing direction of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl Direction {
    /// The value used for the HTML `dir` attribute
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::LeftToRight => "ltr",
            Direction::RightToLeft => "rtl",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a language code as it arrives from configs, CLI flags and PO headers.
///
/// Gettext-style modifiers (`sr@latin`) are rewritten with a dash (`sr-latin`).
pub fn sanitize(language: &str) -> String {
    language.trim().replace('@', "-")
}

/// The primary subtag of a language code, lowercased: `en_GB` → `en`
pub fn base_subtag(language: &str) -> String {
    sanitize(language)
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Classify the likely writing direction of a language
pub fn direction(language: &str) -> Direction {
    let base = base_subtag(language);
    if RTL_LANGUAGES.contains(&base.as_str()) {
        Direction::RightToLeft
    } else {
        Direction::LeftToRight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtl_languages() {
        assert_eq!(direction("ar"), Direction::RightToLeft);
        assert_eq!(direction("he"), Direction::RightToLeft);
        assert_eq!(direction("iw"), Direction::RightToLeft);
    }

    #[test]
    fn test_ltr_languages() {
        assert_eq!(direction("en"), Direction::LeftToRight);
        assert_eq!(direction("fi"), Direction::LeftToRight);
        assert_eq!(direction(""), Direction::LeftToRight);
    }

    #[test]
    fn test_regional_variant_uses_base_subtag() {
        assert_eq!(base_subtag("en_GB"), "en");
        assert_eq!(direction("en_GB"), Direction::LeftToRight);
        assert_eq!(direction("AR_EG"), Direction::RightToLeft);
        assert_eq!(direction("fa-IR"), Direction::RightToLeft);
    }

    #[test]
    fn test_sanitize_modifier() {
        assert_eq!(sanitize("sr@latin"), "sr-latin");
        assert_eq!(sanitize(" fi "), "fi");
        assert_eq!(base_subtag("sr@latin"), "sr");
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::LeftToRight.to_string(), "ltr");
        assert_eq!(Direction::RightToLeft.to_string(), "rtl");
    }
}
