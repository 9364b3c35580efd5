//! Error types for documents, directives and the persistence adapters

use std::fmt;
use std::io;
use std::path::PathBuf;

use chumsky::error::{Rich, RichPattern, RichReason};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A document could not be parsed at all
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /// The file this error is about
    pub fn path(&self) -> &std::path::Path {
        match self {
            ParseError::Read { path, .. } => path,
        }
    }
}

/// A single directive could not be resolved
///
/// These never abort a parse: the `Display` text is substituted in place of
/// the directive so gaps are visible in the rendered output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    #[error("Invalid Frala directive: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("Frala directive is missing required key '{field}'")]
    MissingField { field: &'static str },

    #[error("Unsupported Frala directive type '{kind}'")]
    UnknownKind { kind: String },

    #[error("{name} is not a valid Frala built-in")]
    UnknownBuiltin { name: String },

    #[error("Term {term} is not translated into {language}")]
    Untranslated { term: String, language: String },

    #[error("Fragment {} cannot import itself", path.display())]
    SelfImport { path: PathBuf },

    #[error("Circular fragment import: {chain}")]
    CircularImport { chain: String },

    #[error("Fragment {} could not be read: {reason}", path.display())]
    FragmentUnreadable { path: PathBuf, reason: String },
}

impl DirectiveError {
    /// Short machine-readable tag for the failure kind
    pub fn category(&self) -> &'static str {
        match self {
            DirectiveError::Syntax { .. } => "syntax",
            DirectiveError::MissingField { .. } => "missing-field",
            DirectiveError::UnknownKind { .. } => "unknown-kind",
            DirectiveError::UnknownBuiltin { .. } => "unknown-builtin",
            DirectiveError::Untranslated { .. } => "untranslated",
            DirectiveError::SelfImport { .. } => "self-import",
            DirectiveError::CircularImport { .. } => "circular-import",
            DirectiveError::FragmentUnreadable { .. } => "missing-fragment",
        }
    }
}

/// Errors that can occur when loading or saving a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read or write configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to encode configuration as TOML: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Errors from reading, writing or importing PO files
#[derive(Error, Debug)]
pub enum PoError {
    #[error("Failed to read or write PO file: {0}")]
    Io(#[from] io::Error),

    #[error("PO syntax error at {span:?}: {message}")]
    Syntax { span: Span, message: String },

    #[error("PO file has no Language header")]
    MissingLanguage,
}

/// Pull span, message and expected patterns out of a chumsky error
pub(crate) fn describe_rich<T: fmt::Display>(err: &Rich<'_, T>) -> (Span, String, Vec<String>) {
    let message = match err.reason() {
        RichReason::ExpectedFound { found, .. } => match found {
            Some(tok) => format!("unexpected {}", &**tok),
            None => "unexpected end of input".to_string(),
        },
        RichReason::Custom(msg) => msg.to_string(),
    };

    let expected = err
        .expected()
        .filter_map(|e| match e {
            RichPattern::Token(tok) => Some(format!("{}", &**tok)),
            RichPattern::Label(label) => Some(label.to_string()),
            RichPattern::EndOfInput => Some("end of input".to_string()),
            RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
            RichPattern::Any => Some("any token".to_string()),
            RichPattern::SomethingElse => None,
        })
        .collect();

    (err.span().into_range(), message, expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_distinguishable() {
        let errors = [
            DirectiveError::MissingField { field: "src" },
            DirectiveError::UnknownKind {
                kind: "loop".to_string(),
            },
            DirectiveError::UnknownBuiltin {
                name: "frala.Nope".to_string(),
            },
            DirectiveError::Untranslated {
                term: "greeting".to_string(),
                language: "fr".to_string(),
            },
            DirectiveError::SelfImport {
                path: PathBuf::from("a.html"),
            },
            DirectiveError::CircularImport {
                chain: "a.html -> b.html -> a.html".to_string(),
            },
            DirectiveError::FragmentUnreadable {
                path: PathBuf::from("b.html"),
                reason: "not found".to_string(),
            },
        ];

        let mut categories: Vec<_> = errors.iter().map(|e| e.category()).collect();
        categories.dedup();
        assert_eq!(categories.len(), errors.len());

        assert_eq!(
            errors[3].to_string(),
            "Term greeting is not translated into fr"
        );
        assert_eq!(errors[4].to_string(), "Fragment a.html cannot import itself");
    }

    #[test]
    fn test_parse_error_names_path() {
        let err = ParseError::Read {
            path: PathBuf::from("missing.html"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.path(), std::path::Path::new("missing.html"));
        assert!(err.to_string().contains("missing.html"));
    }
}
