//! FileSystem port - abstraction over file I/O operations
//!
//! This trait allows the deploy pipeline to move build output around
//! without depending on concrete implementations (local disk, in-memory mock).

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    /// File not found
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// I/O error
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Other error
    #[error("{0}")]
    Other(String),
}

impl FsError {
    /// Classify an I/O error, attaching the path it happened on
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// A top-level entry of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O
/// - `MockFileSystem` - in-memory for testing
pub trait FileSystem {
    /// Read file content as raw bytes (pages and snippets need not be UTF-8)
    fn read(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content to file atomically, creating parent directories
    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Remove a file or a directory tree. Missing paths are not an error.
    fn remove_all(&self, path: &Path) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Copy everything under `from` (hidden entries included) into `to`,
    /// creating `to` if needed and overwriting files that already exist.
    fn copy_dir_contents(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// List the immediate children of a directory, sorted by name
    fn list_entries(&self, dir: &Path) -> FsResult<Vec<DirEntry>>;

    /// List every file below `dir`, relative to it, sorted
    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>>;
}
