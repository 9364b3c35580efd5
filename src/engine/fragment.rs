//! Fragment inclusion

use tracing::debug;

use super::{context::ParseContext, DocumentSource, Engine};
use crate::error::DirectiveError;
use crate::lint::Finding;

impl<S: DocumentSource> Engine<'_, S> {
    /// Parse a fragment referenced from the current document
    ///
    /// The reference is resolved against the directory of the current file.
    /// Including the current file, or any file already being included further
    /// up, fails before anything is read.
    pub(crate) fn include_fragment(
        &self,
        reference: &str,
        ctx: &ParseContext,
        findings: &mut Vec<Finding>,
    ) -> Result<String, DirectiveError> {
        let path = ctx.resolve_path(reference);

        if path == ctx.file() {
            return Err(DirectiveError::SelfImport { path });
        }

        if ctx.is_including(&path) {
            return Err(DirectiveError::CircularImport {
                chain: ctx.describe_cycle(&path),
            });
        }

        debug!(
            fragment = %path.display(),
            parent = %ctx.file().display(),
            "including fragment"
        );

        let nested = ctx.nested(path);
        self.parse_document(&nested, findings)
            .map_err(|err| DirectiveError::FragmentUnreadable {
                path: nested.file().to_path_buf(),
                reason: match err {
                    crate::ParseError::Read { source, .. } => source.to_string(),
                },
            })
    }
}
