//! Parsing engine: documents, lines and directive resolution
//!
//! The engine borrows a [`Config`] for terms and languages and reads files
//! through a [`DocumentSource`]. Per-document state (current file, current
//! language, fragment chain) travels in a [`ParseContext`] value, so the
//! engine itself is never mutated while parsing.

mod context;
mod fragment;
mod line;
mod source;
mod term;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub use context::{normalize_path, ParseContext};
pub use source::{DocumentSource, FsSource, MemorySource};
pub use term::{Builtin, BUILTIN_PREFIX};

use crate::config::Config;
use crate::directive::{Directive, DirectiveKind};
use crate::error::{DirectiveError, ParseError};
use crate::lint::Finding;
use line::LineOrigin;

/// Outcome of parsing one document in a batch
#[derive(Debug)]
pub struct ParsedDocument {
    pub path: PathBuf,
    pub result: Result<String, ParseError>,
}

impl ParsedDocument {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Resolves directives in documents
#[derive(Debug, Clone)]
pub struct Engine<'c, S = FsSource> {
    config: &'c Config,
    source: S,
}

impl<'c> Engine<'c, FsSource> {
    /// Create an engine reading from the filesystem
    pub fn new(config: &'c Config) -> Self {
        Self::with_source(config, FsSource)
    }
}

impl<'c, S: DocumentSource> Engine<'c, S> {
    /// Create an engine reading from a custom source
    pub fn with_source(config: &'c Config, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    /// Context for parsing a top-level document in the default language
    pub fn context(&self, path: impl AsRef<Path>) -> ParseContext {
        ParseContext::new(path, self.config.default_language())
    }

    /// Parse a document in the default language
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<String, ParseError> {
        self.parse_with(&self.context(path))
    }

    /// Parse a document in a specific language
    pub fn parse_in(&self, path: impl AsRef<Path>, language: &str) -> Result<String, ParseError> {
        self.parse_with(&ParseContext::new(path, language))
    }

    /// Parse a document under an explicit context
    pub fn parse_with(&self, ctx: &ParseContext) -> Result<String, ParseError> {
        let mut findings = Vec::new();
        self.parse_document(ctx, &mut findings)
    }

    /// Parse a document and collect every directive that failed to resolve
    ///
    /// Failures inside included fragments are attributed to the fragment file.
    pub fn check(&self, path: impl AsRef<Path>, language: &str) -> Result<Vec<Finding>, ParseError> {
        let mut findings = Vec::new();
        self.parse_document(&ParseContext::new(path, language), &mut findings)?;
        Ok(findings)
    }

    /// Resolve a single decoded directive
    pub fn resolve(&self, directive: &Directive, ctx: &ParseContext) -> Result<String, DirectiveError> {
        let mut findings = Vec::new();
        self.resolve_with(directive, ctx, &mut findings)
    }

    /// Parse several documents independently in one language
    ///
    /// A document that cannot be read does not stop the others; results come
    /// back in input order.
    pub fn multi_parse<P: AsRef<Path>>(&self, paths: &[P], language: &str) -> Vec<ParsedDocument> {
        paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                let result = self.parse_in(path, language);
                if let Err(err) = &result {
                    warn!(language, "{}", err);
                }
                ParsedDocument {
                    path: path.to_path_buf(),
                    result,
                }
            })
            .collect()
    }

    /// Parse several documents once per target language
    ///
    /// Languages are the configured list, or the default language when none
    /// are configured.
    pub fn multilingual_parse<P: AsRef<Path>>(&self, paths: &[P]) -> BTreeMap<String, Vec<ParsedDocument>> {
        self.config
            .target_languages()
            .into_iter()
            .map(|language| {
                debug!(language = %language, documents = paths.len(), "parsing batch");
                let parsed = self.multi_parse(paths, &language);
                (language, parsed)
            })
            .collect()
    }

    pub(crate) fn parse_document(
        &self,
        ctx: &ParseContext,
        findings: &mut Vec<Finding>,
    ) -> Result<String, ParseError> {
        let bytes = self.source.read(ctx.file()).map_err(|source| ParseError::Read {
            path: ctx.file().to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            warn!(
                file = %ctx.file().display(),
                "document is not valid UTF-8, invalid bytes replaced with U+FFFD"
            );
        }

        debug!(
            file = %ctx.file().display(),
            language = ctx.language(),
            depth = ctx.depth(),
            "parsing document"
        );

        // Every line, including an unterminated last one, ends with '\n'
        let mut output = String::with_capacity(content.len() + 1);
        let mut offset = 0;
        for (index, raw) in content.split_inclusive('\n').enumerate() {
            let line = raw.strip_suffix('\n').unwrap_or(raw);
            let origin = LineOrigin {
                number: index + 1,
                offset,
            };
            output.push_str(&self.expand_line(line, ctx, origin, findings));
            output.push('\n');
            offset += raw.len();
        }

        Ok(output)
    }

    pub(crate) fn resolve_with(
        &self,
        directive: &Directive,
        ctx: &ParseContext,
        findings: &mut Vec<Finding>,
    ) -> Result<String, DirectiveError> {
        match directive.kind {
            DirectiveKind::Term => self.term_value(&directive.source, directive.lang.as_deref(), ctx),
            DirectiveKind::Fragment => self.include_fragment(&directive.source, ctx, findings),
        }
    }
}
