//! Error types for docpub
//!
//! Uses `thiserror` for library errors. Each port carries its own error
//! enum; `DocpubError` wraps them and adds the orchestration failures.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{BuildError, FsError, VcsError};
use crate::domain::value_objects::{DeployStep, PatternError};

/// Result type alias for docpub operations
pub type DocpubResult<T> = Result<T, DocpubError>;

/// Main error type for docpub operations
#[derive(Error, Debug)]
pub enum DocpubError {
    /// A pipeline step failed; the remaining steps were not run
    #[error("step {} ({step}) failed: {source}", .step.number())]
    StepFailed {
        step: DeployStep,
        #[source]
        source: Box<DocpubError>,
    },

    /// Filesystem collaborator error
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Version control collaborator error
    #[error(transparent)]
    Vcs(#[from] VcsError),

    /// Documentation build tool error
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Invalid clear/prune pattern
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Invalid configuration file
    #[error("invalid configuration in {}: {message}", .file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// The run was started while the publish branch is checked out
    #[error("already on publish branch '{branch}'; check out the branch whose docs should be published")]
    OnPublishBranch { branch: String },

    /// Tracked files have uncommitted changes
    #[error("working tree has uncommitted changes; commit or stash them, or pass --allow-dirty")]
    DirtyWorkingTree,

    /// Snippet marker missing from the HTML entry page
    #[error("marker '{marker}' not found in {}", .file.display())]
    MarkerNotFound { marker: String, file: PathBuf },

    /// Another run holds the staging lock
    #[error("another deploy is already running (lock held on {})", .path.display())]
    Locked { path: PathBuf },

    /// User pressed Ctrl+C between steps
    #[error("deploy interrupted")]
    Interrupted,

    /// No home directory to place the default staging directory in
    #[error("could not determine the user home directory; set paths.tmp_dir explicitly")]
    NoHomeDir,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocpubError {
    /// The step that failed, if this error came out of the pipeline
    pub fn failed_step(&self) -> Option<DeployStep> {
        match self {
            DocpubError::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }
}
