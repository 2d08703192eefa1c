//! Byte-source providers for external resources.
//!
//! A [`ByteSource`] resolves a URI (relative to the document) to raw bytes.
//! Resolution failure is not an error at this layer: the source returns an
//! empty vector and the loader decides what that means.

use std::path::{Path, PathBuf};

/// Resolves resource URIs to bytes.
pub trait ByteSource {
    /// Return the bytes behind `uri`, or an empty vector if unavailable.
    fn resolve(&self, uri: &str) -> Vec<u8>;
}

impl<F> ByteSource for F
where
    F: Fn(&str) -> Vec<u8>,
{
    fn resolve(&self, uri: &str) -> Vec<u8> {
        self(uri)
    }
}

/// Source that never resolves anything.
///
/// Useful for documents whose buffers are all embedded as data URIs.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySource;

impl ByteSource for EmptySource {
    fn resolve(&self, _uri: &str) -> Vec<u8> {
        Vec::new()
    }
}

/// Source reading files relative to a root directory.
#[derive(Clone, Debug)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a source rooted at the directory containing `document`.
    pub fn for_document(document: impl AsRef<Path>) -> Self {
        let root = document
            .as_ref()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self { root }
    }

    /// Root directory URIs are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ByteSource for FileSource {
    fn resolve(&self, uri: &str) -> Vec<u8> {
        let path = self.root.join(uri);
        match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read resource");
                Vec::new()
            }
        }
    }
}
