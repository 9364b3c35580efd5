//! Where documents are read from

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use super::context::normalize_path;

/// Read access to documents and fragments
pub trait DocumentSource {
    /// Read the raw bytes of a whole document
    ///
    /// Errors are limited to the document being missing or inaccessible;
    /// decoding is left to the engine.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read(path)
    }
}

/// Reads documents from the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Documents held in memory, keyed by normalized path
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a document
    pub fn insert(&mut self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.files
            .insert(normalize_path(path.as_ref()), content.into());
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such document"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_normalizes_paths() {
        let source = MemorySource::new().with_file("dir/./a.html", "hello");
        assert_eq!(source.read(Path::new("dir/a.html")).unwrap(), b"hello");
        assert_eq!(source.read(Path::new("dir/sub/../a.html")).unwrap(), b"hello");
    }

    #[test]
    fn test_memory_source_missing_file() {
        let err = MemorySource::new()
            .read(Path::new("missing.html"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
