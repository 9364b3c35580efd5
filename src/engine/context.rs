//! Per-document parse context

use std::path::{Component, Path, PathBuf};

use crate::lang;

/// Where and in which language a document is being parsed
///
/// Fragments get their own nested context; the parent's context is never
/// modified, so directives after a fragment resolve against the parent again.
#[derive(Debug, Clone)]
pub struct ParseContext {
    file: PathBuf,
    language: String,
    /// Files whose parse is in progress above this one, outermost first
    chain: Vec<PathBuf>,
}

impl ParseContext {
    /// Create a context for a top-level document
    pub fn new(file: impl AsRef<Path>, language: impl AsRef<str>) -> Self {
        Self {
            file: normalize_path(file.as_ref()),
            language: lang::sanitize(language.as_ref()),
            chain: Vec::new(),
        }
    }

    /// Create a nested context for a fragment included from this document
    pub fn nested(&self, file: PathBuf) -> Self {
        let mut chain = self.chain.clone();
        chain.push(self.file.clone());
        Self {
            file,
            language: self.language.clone(),
            chain,
        }
    }

    /// The file currently being parsed
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The language used for terms without an explicit `lang`
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Resolve a fragment reference relative to the directory of the current file
    pub fn resolve_path(&self, reference: &str) -> PathBuf {
        let dir = self.file.parent().unwrap_or(Path::new(""));
        normalize_path(&dir.join(reference))
    }

    /// Check if a file is already being parsed further up the fragment chain
    pub fn is_including(&self, file: &Path) -> bool {
        self.chain.iter().any(|f| f == file)
    }

    /// Render the fragment chain that would be closed by including `file`
    pub fn describe_cycle(&self, file: &Path) -> String {
        let start = self.chain.iter().position(|f| f == file).unwrap_or(0);
        let mut names: Vec<String> = self.chain[start..]
            .iter()
            .map(|f| f.display().to_string())
            .collect();
        names.push(self.file.display().to_string());
        names.push(file.display().to_string());
        names.join(" -> ")
    }

    /// Nesting depth; 0 for a top-level document
    pub fn depth(&self) -> usize {
        self.chain.len()
    }
}

/// Fold `.` and `..` components without touching the filesystem
///
/// `dir/./sub/../b.html` becomes `dir/b.html`. Leading `..` components of a
/// relative path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
