//! Line scanning: find directives, resolve them, reassemble the line

use std::borrow::Cow;
use std::path::PathBuf;

use tracing::debug;

use super::{context::ParseContext, DocumentSource, Engine};
use crate::directive::{self, CLOSE, OPEN};
use crate::lint::Finding;

/// Position of a line within its file
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LineOrigin {
    /// 1-based line number
    pub number: usize,
    /// Byte offset of the line start
    pub offset: usize,
}

impl<S: DocumentSource> Engine<'_, S> {
    /// Replace every directive in a single line
    ///
    /// Text outside directives is kept byte for byte. A `{{` without a closing
    /// `}}` on the same line is left as plain text.
    pub fn parse_line<'l>(&self, line: &'l str, ctx: &ParseContext) -> Cow<'l, str> {
        let mut findings = Vec::new();
        self.expand_line(line, ctx, LineOrigin::default(), &mut findings)
    }

    pub(crate) fn expand_line<'l>(
        &self,
        line: &'l str,
        ctx: &ParseContext,
        origin: LineOrigin,
        findings: &mut Vec<Finding>,
    ) -> Cow<'l, str> {
        if !line.contains(OPEN) {
            return Cow::Borrowed(line);
        }

        let mut segments = line.split(OPEN);
        let mut output = String::with_capacity(line.len());
        let head = segments.next().unwrap_or_default();
        output.push_str(head);
        let mut offset = head.len();

        for segment in segments {
            let start = offset;
            offset += OPEN.len() + segment.len();

            let Some((inner, rest)) = segment.split_once(CLOSE) else {
                output.push_str(OPEN);
                output.push_str(segment);
                continue;
            };

            match self.expand_directive(inner.trim(), ctx, findings) {
                Ok(text) => output.push_str(&text),
                Err(err) => {
                    debug!(
                        file = %ctx.file().display(),
                        line = origin.number,
                        category = err.category(),
                        "{}", err
                    );
                    output.push_str(&err.to_string());

                    let end = start + OPEN.len() + inner.len() + CLOSE.len();
                    findings.push(Finding {
                        file: PathBuf::from(ctx.file()),
                        line: origin.number,
                        span: origin.offset + start..origin.offset + end,
                        error: err,
                    });
                }
            }
            output.push_str(rest);
        }

        Cow::Owned(output)
    }

    fn expand_directive(
        &self,
        text: &str,
        ctx: &ParseContext,
        findings: &mut Vec<Finding>,
    ) -> Result<String, crate::DirectiveError> {
        let directive = directive::decode(text)?;
        self.resolve_with(&directive, ctx, findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::MemorySource;
    use pretty_assertions::assert_eq;

    fn config() -> Config {
        Config::new()
            .with_term("greeting", "en", "Hello")
            .with_term("name", "en", "World")
    }

    #[test]
    fn test_line_without_directive_is_borrowed() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "en");

        let out = engine.parse_line("  <p>plain}} text</p>  ", &ctx);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "  <p>plain}} text</p>  ");
    }

    #[test]
    fn test_multiple_directives_keep_surrounding_text() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "en");

        let out = engine.parse_line(
            "  <p>{{ type=term src=greeting }}, {{type=term src=name}}!</p> ",
            &ctx,
        );
        assert_eq!(out, "  <p>Hello, World!</p> ");
    }

    #[test]
    fn test_adjacent_directives() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "en");

        let out = engine.parse_line("{{type=term src=greeting}}{{type=term src=name}}", &ctx);
        assert_eq!(out, "HelloWorld");
    }

    #[test]
    fn test_unclosed_directive_is_plain_text() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "en");

        let out = engine.parse_line(
            "<p>{{ type=term src=greeting }} and {{ type=term src=name",
            &ctx,
        );
        assert_eq!(out, "<p>Hello and {{ type=term src=name");
    }

    #[test]
    fn test_malformed_directive_is_replaced_inline() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "en");

        let out = engine.parse_line("<b>{{ type=term }}</b> {{ type=term src=name }}", &ctx);
        assert_eq!(
            out,
            "<b>Frala directive is missing required key 'src'</b> World"
        );
    }

    #[test]
    fn test_findings_carry_file_offsets() {
        let config = config();
        let engine = Engine::with_source(&config, MemorySource::new());
        let ctx = ParseContext::new("page.html", "en");
        let mut findings = Vec::new();

        let origin = LineOrigin {
            number: 3,
            offset: 100,
        };
        engine.expand_line("ab{{ type=term src=x }}cd", &ctx, origin, &mut findings);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 3);
        assert_eq!(findings[0].span, 102..123);
        assert_eq!(findings[0].error.category(), "untranslated");
    }
}
