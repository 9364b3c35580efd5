//! Project configuration: languages and terms, persisted as TOML

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::lang::{self, Direction};
use crate::terms::TermStore;

/// Default configuration file name
pub const CONFIG_FILE: &str = "frala.toml";

/// Language used when a configuration does not name one
pub const FALLBACK_LANGUAGE: &str = "en";

/// Configuration of a Frala project
///
/// ```toml
/// default_language = "en"
/// languages = ["en", "fi"]
///
/// [terms.greeting]
/// en = "Hello"
/// fi = "Hei"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    default_language: String,
    languages: Vec<String>,
    terms: TermStore,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: FALLBACK_LANGUAGE.to_string(),
            languages: Vec::new(),
            terms: TermStore::new(),
        }
    }
}

impl Config {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str(&content)?;
        info!(
            path = %path.display(),
            terms = config.terms.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Encode the configuration as pretty TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    fn normalize(&mut self) {
        self.set_default_language(&self.default_language.clone());
        self.languages = std::mem::take(&mut self.languages)
            .iter()
            .map(|l| lang::sanitize(l))
            .filter(|l| !l.is_empty())
            .collect();
        self.languages.sort();
        self.languages.dedup();
        self.terms.normalize_languages();
    }

    /// Set the default language
    pub fn with_default_language(mut self, language: &str) -> Self {
        self.set_default_language(language);
        self
    }

    /// Set the configured languages
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.languages.clear();
        for language in languages {
            self.add_language(language.as_ref());
        }
        self
    }

    /// Add a translation of a term
    pub fn with_term(mut self, name: &str, language: &str, value: &str) -> Self {
        self.terms.set_value(name, language, value);
        self
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Change the default language; an empty value resets it to `en`
    pub fn set_default_language(&mut self, language: &str) {
        let language = lang::sanitize(language);
        self.default_language = if language.is_empty() {
            FALLBACK_LANGUAGE.to_string()
        } else {
            language
        };
    }

    /// Likely writing direction of the default language
    pub fn direction(&self) -> Direction {
        lang::direction(&self.default_language)
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Languages to produce output for: the configured list, or just the default language
    pub fn target_languages(&self) -> Vec<String> {
        if self.languages.is_empty() {
            vec![self.default_language.clone()]
        } else {
            self.languages.clone()
        }
    }

    /// Add a language, keeping the list sorted and free of duplicates
    ///
    /// Returns `false` if the language was already configured.
    pub fn add_language(&mut self, language: &str) -> bool {
        let language = lang::sanitize(language);
        if language.is_empty() {
            return false;
        }
        match self.languages.binary_search(&language) {
            Ok(_) => false,
            Err(pos) => {
                self.languages.insert(pos, language);
                true
            }
        }
    }

    /// Remove a language from the list; translations stay in the term store
    pub fn remove_language(&mut self, language: &str) -> bool {
        let language = lang::sanitize(language);
        let before = self.languages.len();
        self.languages.retain(|l| *l != language);
        self.languages.len() != before
    }

    pub fn terms(&self) -> &TermStore {
        &self.terms
    }

    pub fn terms_mut(&mut self) -> &mut TermStore {
        &mut self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_language(), "en");
        assert!(config.languages().is_empty());
        assert!(config.terms().is_empty());
        assert_eq!(config.target_languages(), vec!["en".to_string()]);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
default_language = "fi"
languages = ["fi", "en", "fi"]

[terms.greeting]
en = "Hello"
fi = "Hei"
"#;
        let config = Config::from_str(toml_str).expect("Should parse");
        assert_eq!(config.default_language(), "fi");
        assert_eq!(config.languages(), &["en".to_string(), "fi".to_string()]);
        assert_eq!(config.terms().value("greeting", "fi"), Some("Hei"));
    }

    #[test]
    fn test_empty_default_language_falls_back() {
        let config = Config::from_str(r#"default_language = """#).expect("Should parse");
        assert_eq!(config.default_language(), "en");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_str("").expect("Should parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_language_is_sanitized() {
        let config = Config::new().with_default_language("sr@latin");
        assert_eq!(config.default_language(), "sr-latin");
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Config::from_str("languages = {{{{");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::new()
            .with_default_language("fi")
            .with_languages(["fi", "en"])
            .with_term("greeting", "en", "Hello")
            .with_term("nav.home", "fi", "Koti");

        let encoded = config.to_toml_string().expect("Should encode");
        let decoded = Config::from_str(&encoded).expect("Should decode");
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_add_language_sorted_and_deduplicated() {
        let mut config = Config::new();
        assert!(config.add_language("fi"));
        assert!(config.add_language("de"));
        assert!(!config.add_language("fi"));
        assert!(!config.add_language(""));
        assert_eq!(config.languages(), &["de".to_string(), "fi".to_string()]);
    }

    #[test]
    fn test_remove_language() {
        let mut config = Config::new().with_languages(["en", "fi"]);
        assert!(config.remove_language("fi"));
        assert!(!config.remove_language("fi"));
        assert_eq!(config.languages(), &["en".to_string()]);
    }

    #[test]
    fn test_direction_follows_default_language() {
        assert_eq!(Config::new().direction(), Direction::LeftToRight);
        assert_eq!(
            Config::new().with_default_language("ar").direction(),
            Direction::RightToLeft
        );
    }
}
