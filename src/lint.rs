//! Directive findings and their reports

use std::path::PathBuf;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use crate::error::{DirectiveError, Span};

/// A directive that failed to resolve
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    /// File containing the directive
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// Byte range of the whole `{{ ... }}` within the file
    pub span: Span,
    pub error: DirectiveError,
}

impl Finding {
    /// Format the finding with source context using ariadne
    ///
    /// `source` must be the content of [`Finding::file`].
    pub fn report(&self, source: &str) -> String {
        self.render(source, false)
    }

    /// Like [`Finding::report`], with ANSI colors for terminals
    pub fn report_colored(&self, source: &str) -> String {
        self.render(source, true)
    }

    fn render(&self, source: &str, color: bool) -> String {
        let filename = self.file.display().to_string();
        let filename = filename.as_str();

        let mut note = String::new();
        if let DirectiveError::Syntax { expected, .. } = &self.error {
            if !expected.is_empty() {
                note = format!("\nExpected: {}", expected.join(", "));
            }
        }

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Warning, filename, self.span.start)
            .with_config(Config::default().with_color(color))
            .with_code(self.error.category())
            .with_message(self.error.to_string())
            .with_label(
                Label::new((filename, self.span.clone()))
                    .with_message(format!("{}{}", self.error, note))
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.file.display(),
            self.line,
            self.error.category(),
            self.error
        )
    }
}
