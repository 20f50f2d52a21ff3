//! Run lock
//!
//! A deploy mutates the working tree and the checked-out branch in place.
//! Two runs against the same staging directory would interleave checkouts,
//! so each run holds an exclusive advisory lock on `<tmp_dir>.lock` for
//! its whole duration.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{DocpubError, DocpubResult};

/// Exclusive lock held for the duration of a deploy run
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Lock file path used for a staging directory
    pub fn path_for(tmp_dir: &Path) -> PathBuf {
        let mut name = tmp_dir
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "docpub".into());
        name.push(".lock");
        tmp_dir.with_file_name(name)
    }

    /// Take the lock without blocking; fails with `DocpubError::Locked` if
    /// another run holds it.
    pub fn acquire(tmp_dir: &Path) -> DocpubResult<Self> {
        let path = Self::path_for(tmp_dir);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        file.try_lock_exclusive()
            .map_err(|_| DocpubError::Locked { path: path.clone() })?;

        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// The lock file is never unlinked; every run must lock the same inode.
impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
