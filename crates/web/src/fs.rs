//! Filesystem access for the `/files/` routes.
//!
//! A [`ServedDirectory`] wraps the optional directory root given at startup.
//! Client-supplied filenames are untrusted: names that are absolute or that
//! contain a parent-directory component are rejected before any filesystem
//! call. When no root is configured every operation fails with
//! [`FsError::Unconfigured`] and the route handlers turn that into the
//! appropriate status.

use std::io;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tracing::trace;

/// The directory root served under `/files/`, fixed at startup.
///
/// Cloned into each file route handler; there is no shared mutable state.
#[derive(Debug, Clone, Default)]
pub struct ServedDirectory {
    root: Option<PathBuf>,
}

impl ServedDirectory {
    /// A served directory with no root; all operations fail.
    pub fn unconfigured() -> Self {
        Self { root: None }
    }

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: Some(root.into()) }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Reads the file `name` names, relative to the root.
    pub async fn read(&self, name: &str) -> Result<Bytes, FsError> {
        let path = self.resolve(name)?;
        trace!(path = %path.display(), "reading served file");
        let contents = tokio::fs::read(path).await?;
        Ok(Bytes::from(contents))
    }

    /// Creates or truncates the file `name` names and writes `contents`.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<(), FsError> {
        let path = self.resolve(name)?;
        trace!(path = %path.display(), len = contents.len(), "writing served file");
        tokio::fs::write(path, contents).await?;
        Ok(())
    }

    /// Joins `name` onto the root, rejecting names that could escape it.
    ///
    /// Subdirectory names without parent components are allowed; the target
    /// is never canonicalized, so symlinks inside the root behave as the
    /// operator laid them out.
    fn resolve(&self, name: &str) -> Result<PathBuf, FsError> {
        let root = self.root.as_ref().ok_or(FsError::Unconfigured)?;

        let relative = Path::new(name);
        if relative.is_absolute() {
            return Err(FsError::traversal(name));
        }
        if relative.components().any(|component| matches!(component, Component::ParentDir)) {
            return Err(FsError::traversal(name));
        }

        Ok(root.join(relative))
    }
}

#[derive(Error, Debug)]
pub enum FsError {
    #[error("no served directory is configured")]
    Unconfigured,

    #[error("filename {name:?} escapes the served directory")]
    Traversal { name: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl FsError {
    fn traversal(name: impl Into<String>) -> Self {
        Self::Traversal { name: name.into() }
    }
}
