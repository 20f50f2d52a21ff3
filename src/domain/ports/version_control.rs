//! VersionControl port - the git operations the deploy pipeline needs

use thiserror::Error;

pub type VcsResult<T> = Result<T, VcsError>;

#[derive(Debug, Error)]
pub enum VcsError {
    /// The git binary could not be started
    #[error("failed to execute git: {0}")]
    Spawn(String),

    /// A git command exited non-zero
    #[error("`git {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// HEAD does not point at a branch
    #[error("HEAD is detached; check out a branch before deploying")]
    DetachedHead,

    #[error("{0}")]
    Other(String),
}

/// What a commit attempt produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was recorded
    Committed,
    /// The index matched HEAD; no commit was made
    NothingToCommit,
}

/// Abstract version control interface
///
/// Implementations:
/// - `GitCli` - shells out to `git`
/// - `MockVcs` - scripted in-memory repository for testing
pub trait VersionControl {
    /// Whether the working directory is inside a repository
    fn is_repository(&self) -> bool;

    /// Name of the checked-out branch
    fn current_branch(&self) -> VcsResult<String>;

    /// Abbreviated one-line log entry (`<short-sha> <subject>`) of a branch tip
    fn last_commit_oneline(&self, branch: &str) -> VcsResult<String>;

    /// Whether a local branch exists
    fn branch_exists(&self, branch: &str) -> VcsResult<bool>;

    /// Whether a remote is configured
    fn remote_exists(&self, remote: &str) -> VcsResult<bool>;

    /// Whether tracked files are free of uncommitted changes
    fn is_clean(&self) -> VcsResult<bool>;

    fn checkout(&self, branch: &str) -> VcsResult<()>;

    /// Stage every change in the working tree, deletions included
    fn stage_all(&self) -> VcsResult<()>;

    fn commit(&self, message: &str) -> VcsResult<CommitOutcome>;

    fn push(&self, remote: &str, branch: &str) -> VcsResult<()>;
}

impl<T: VersionControl + ?Sized> VersionControl for &T {
    fn is_repository(&self) -> bool {
        (**self).is_repository()
    }

    fn current_branch(&self) -> VcsResult<String> {
        (**self).current_branch()
    }

    fn last_commit_oneline(&self, branch: &str) -> VcsResult<String> {
        (**self).last_commit_oneline(branch)
    }

    fn branch_exists(&self, branch: &str) -> VcsResult<bool> {
        (**self).branch_exists(branch)
    }

    fn remote_exists(&self, remote: &str) -> VcsResult<bool> {
        (**self).remote_exists(remote)
    }

    fn is_clean(&self) -> VcsResult<bool> {
        (**self).is_clean()
    }

    fn checkout(&self, branch: &str) -> VcsResult<()> {
        (**self).checkout(branch)
    }

    fn stage_all(&self) -> VcsResult<()> {
        (**self).stage_all()
    }

    fn commit(&self, message: &str) -> VcsResult<CommitOutcome> {
        (**self).commit(message)
    }

    fn push(&self, remote: &str, branch: &str) -> VcsResult<()> {
        (**self).push(remote, branch)
    }
}
