//! Term resolution: built-in pseudo-terms and user terms

use tracing::debug;

use super::{context::ParseContext, DocumentSource, Engine};
use crate::error::DirectiveError;
use crate::lang;

/// Prefix reserved for built-in pseudo-terms
pub const BUILTIN_PREFIX: &str = "frala.";

/// Values read from the parse context or configuration instead of the term store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `frala.CurrentLanguage`
    CurrentLanguage,
    /// `frala.DefaultLanguage`
    DefaultLanguage,
    /// `frala.Direction`: `ltr` or `rtl` for the default language
    Direction,
    /// `frala.Languages`: configured languages, comma separated
    Languages,
}

impl Builtin {
    /// Look up a built-in by its full name, including the `frala.` prefix
    pub fn from_name(name: &str) -> Option<Self> {
        match name.strip_prefix(BUILTIN_PREFIX)? {
            "CurrentLanguage" => Some(Builtin::CurrentLanguage),
            "DefaultLanguage" => Some(Builtin::DefaultLanguage),
            "Direction" => Some(Builtin::Direction),
            "Languages" => Some(Builtin::Languages),
            _ => None,
        }
    }
}

impl<S: DocumentSource> Engine<'_, S> {
    /// Resolve a term for the given context
    ///
    /// Without an explicit language the context's current language is used.
    /// An untranslated term is reported as [`DirectiveError::Untranslated`],
    /// whose text names both the term and the language.
    pub fn term_value(
        &self,
        name: &str,
        lang: Option<&str>,
        ctx: &ParseContext,
    ) -> Result<String, DirectiveError> {
        if name.starts_with(BUILTIN_PREFIX) {
            let builtin = Builtin::from_name(name).ok_or_else(|| DirectiveError::UnknownBuiltin {
                name: name.to_string(),
            })?;
            return Ok(self.builtin_value(builtin, ctx));
        }

        let language = match lang.filter(|l| !l.is_empty()) {
            Some(explicit) => lang::sanitize(explicit),
            None => ctx.language().to_string(),
        };

        match self.config.terms().value(name, &language) {
            Some(value) => Ok(value.to_string()),
            None => {
                debug!(term = name, language = %language, "untranslated term");
                Err(DirectiveError::Untranslated {
                    term: name.to_string(),
                    language,
                })
            }
        }
    }

    /// Value of a built-in pseudo-term
    pub fn builtin_value(&self, builtin: Builtin, ctx: &ParseContext) -> String {
        match builtin {
            Builtin::CurrentLanguage => ctx.language().to_string(),
            Builtin::DefaultLanguage => self.config.default_language().to_string(),
            Builtin::Direction => self.config.direction().to_string(),
            Builtin::Languages => self.config.target_languages().join(","),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::MemorySource;

    fn config() -> Config {
        Config::new()
            .with_languages(["en", "fi"])
            .with_term("greeting", "en", "Hello")
            .with_term("greeting", "fi", "Hei")
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(Builtin::from_name("frala.Direction"), Some(Builtin::Direction));
        assert_eq!(Builtin::from_name("frala.Nope"), None);
        assert_eq!(Builtin::from_name("Direction"), None);
    }

    #[test]
    fn test_unqualified_term_uses_current_language() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "fi");
        assert_eq!(engine.term_value("greeting", None, &ctx).unwrap(), "Hei");
        assert_eq!(engine.term_value("greeting", Some(""), &ctx).unwrap(), "Hei");
    }

    #[test]
    fn test_explicit_language_overrides_current() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "fi");
        assert_eq!(engine.term_value("greeting", Some("en"), &ctx).unwrap(), "Hello");
    }

    #[test]
    fn test_missing_translation_is_named() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "fr");

        let err = engine.term_value("greeting", None, &ctx).unwrap_err();
        assert_eq!(err.to_string(), "Term greeting is not translated into fr");
    }

    #[test]
    fn test_missing_term_does_not_create_entry() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "en");

        let err = engine.term_value("farewell", None, &ctx).unwrap_err();
        assert_eq!(err.category(), "untranslated");
        assert!(!config.terms().contains("farewell"));
    }

    #[test]
    fn test_builtins() {
        let config = config().with_default_language("ar");
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "fi");

        assert_eq!(engine.term_value("frala.CurrentLanguage", None, &ctx).unwrap(), "fi");
        assert_eq!(engine.term_value("frala.DefaultLanguage", None, &ctx).unwrap(), "ar");
        assert_eq!(engine.term_value("frala.Direction", None, &ctx).unwrap(), "rtl");
        assert_eq!(engine.term_value("frala.Languages", None, &ctx).unwrap(), "en,fi");
    }

    #[test]
    fn test_languages_builtin_falls_back_to_default() {
        let config = Config::new().with_default_language("fi");
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "fi");
        assert_eq!(engine.term_value("frala.Languages", None, &ctx).unwrap(), "fi");
    }

    #[test]
    fn test_unknown_builtin() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "en");

        let err = engine.term_value("frala.Version", None, &ctx).unwrap_err();
        assert_eq!(err.to_string(), "frala.Version is not a valid Frala built-in");
    }
}
