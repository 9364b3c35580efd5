//! Directive types

use std::fmt;

/// Byte range in directive text
pub type Span = std::ops::Range<usize>;

/// Node with its location in the directive text
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A `key=value` pair as written in the directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

/// What a directive asks to substitute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// A localized term value
    Term,
    /// The parsed content of another file
    Fragment,
}

impl DirectiveKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "term" => Some(DirectiveKind::Term),
            "fragment" => Some(DirectiveKind::Fragment),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DirectiveKind::Term => "term",
            DirectiveKind::Fragment => "fragment",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// Term name, fragment path or `frala.*` built-in
    pub source: String,
    /// Explicit language; `None` means the current language
    pub lang: Option<String>,
}

impl Directive {
    /// Create a term directive
    pub fn term(source: impl Into<String>) -> Self {
        Self {
            kind: DirectiveKind::Term,
            source: source.into(),
            lang: None,
        }
    }

    /// Create a fragment directive
    pub fn fragment(source: impl Into<String>) -> Self {
        Self {
            kind: DirectiveKind::Fragment,
            source: source.into(),
            lang: None,
        }
    }

    /// Set an explicit language
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}
