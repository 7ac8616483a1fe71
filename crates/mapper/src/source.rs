//! Access to intermediate files.
//!
//! The mapper reads through [`IntermediateSource`] so the file system can be
//! swapped for an in-memory table in tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Supplier of intermediate file contents.
pub trait IntermediateSource {
    /// Read the whole file at `path`, split into lines.
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>>;
}

/// Reads from disk on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl IntermediateSource for FsSource {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let text = fs::read_to_string(path)?;
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// Fixed set of files held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    files: HashMap<PathBuf, String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `contents` under `path`, replacing any previous entry.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl IntermediateSource for InMemorySource {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        self.files
            .get(path)
            .map(|text| text.lines().map(str::to_string).collect())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such intermediate file"))
    }
}

impl<S: IntermediateSource + ?Sized> IntermediateSource for &S {
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        (**self).read_lines(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_lookup() {
        let src = InMemorySource::new().with_file("a.bpl", "one\ntwo\n");
        assert_eq!(src.read_lines(Path::new("a.bpl")).unwrap(), vec!["one", "two"]);
        let err = src.read_lines(Path::new("b.bpl")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn fs_source_missing_file() {
        let err = FsSource
            .read_lines(Path::new("/nonexistent/solc-verify/a.bpl"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
