//! Deploy Options
//!
//! Configuration types for deploy operations.

use std::path::{Component, Path, PathBuf};

use crate::config::Config;
use crate::error::{DocpubError, DocpubResult};

/// Staging directory used when none is configured, relative to home
pub const DEFAULT_STAGING_DIR: &str = ".docpub/staging";

/// Options for the deploy use case
///
/// All paths are resolved; nothing here is relative to the process's
/// working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOptions {
    /// Docs project directory (build command runs here)
    pub docs_dir: PathBuf,
    /// Root of the published tree on the publish branch
    pub dst_dir: PathBuf,
    /// Temp staging directory holding the build snapshot
    pub tmp_dir: PathBuf,
    /// Build output directory, relative to `docs_dir`
    pub build_dir: PathBuf,
    /// HTML output directory, relative to `build_dir`
    pub html_subdir: PathBuf,
    /// Tracking snippet file, relative to `docs_dir`
    pub snippet_file: PathBuf,
    pub snippet_marker: String,
    pub remote: String,
    pub publish_branch: String,
    /// Patterns of stale top-level entries cleared from `dst_dir`
    pub clear: Vec<String>,
    /// Patterns of top-level entries removed after publishing
    pub prune: Vec<String>,
    pub commit_message: String,
    /// Run only the read-only context checks
    pub dry_run: bool,
    /// Push after committing
    pub push: bool,
    /// Skip the clean-working-tree precondition
    pub allow_dirty: bool,
}

impl DeployOptions {
    /// Options with every non-path setting at its default
    pub fn new(
        docs_dir: impl Into<PathBuf>,
        dst_dir: impl Into<PathBuf>,
        tmp_dir: impl Into<PathBuf>,
    ) -> Self {
        let defaults = Config::default();
        Self {
            docs_dir: docs_dir.into(),
            dst_dir: dst_dir.into(),
            tmp_dir: tmp_dir.into(),
            build_dir: defaults.paths.build_dir,
            html_subdir: defaults.paths.html_subdir,
            snippet_file: defaults.build.snippet_file,
            snippet_marker: defaults.build.snippet_marker,
            remote: defaults.git.remote,
            publish_branch: defaults.git.branch,
            clear: defaults.publish.clear,
            prune: defaults.publish.prune,
            commit_message: defaults.git.commit_message,
            dry_run: false,
            push: true,
            allow_dirty: false,
        }
    }

    /// Resolve options from a loaded config.
    ///
    /// Relative paths are taken against `base`. `dst_dir` defaults to the
    /// parent of `docs_dir`; `tmp_dir` defaults to `~/.docpub/staging`.
    pub fn from_config(config: &Config, base: &Path, home: Option<&Path>) -> DocpubResult<Self> {
        let docs_dir = match &config.paths.docs_dir {
            Some(dir) => resolve_path(base, dir, home),
            None => normalize(base),
        };

        let dst_dir = match &config.paths.dst_dir {
            Some(dir) => resolve_path(base, dir, home),
            None => docs_dir
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| DocpubError::InvalidConfig {
                    file: PathBuf::from(crate::config::CONFIG_FILE_NAME),
                    message: format!(
                        "docs directory {} has no parent; set paths.dst_dir",
                        docs_dir.display()
                    ),
                })?,
        };

        let tmp_dir = match &config.paths.tmp_dir {
            Some(dir) => resolve_path(base, dir, home),
            None => home.ok_or(DocpubError::NoHomeDir)?.join(DEFAULT_STAGING_DIR),
        };

        Ok(Self {
            docs_dir,
            dst_dir,
            tmp_dir,
            build_dir: config.paths.build_dir.clone(),
            html_subdir: config.paths.html_subdir.clone(),
            snippet_file: config.build.snippet_file.clone(),
            snippet_marker: config.build.snippet_marker.clone(),
            remote: config.git.remote.clone(),
            publish_branch: config.git.branch.clone(),
            clear: config.publish.clear.clone(),
            prune: config.publish.prune.clone(),
            commit_message: config.git.commit_message.clone(),
            dry_run: false,
            push: true,
            allow_dirty: false,
        })
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn with_publish_branch(mut self, branch: impl Into<String>) -> Self {
        self.publish_branch = branch.into();
        self
    }

    pub fn with_clear(mut self, patterns: Vec<String>) -> Self {
        self.clear = patterns;
        self
    }

    pub fn with_prune(mut self, patterns: Vec<String>) -> Self {
        self.prune = patterns;
        self
    }

    pub fn with_commit_message(mut self, template: impl Into<String>) -> Self {
        self.commit_message = template.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_push(mut self, push: bool) -> Self {
        self.push = push;
        self
    }

    pub fn with_allow_dirty(mut self, allow_dirty: bool) -> Self {
        self.allow_dirty = allow_dirty;
        self
    }

    /// `docs_dir/build`
    pub fn build_path(&self) -> PathBuf {
        self.docs_dir.join(&self.build_dir)
    }

    /// `docs_dir/build/html`
    pub fn html_path(&self) -> PathBuf {
        self.build_path().join(&self.html_subdir)
    }

    /// Entry page the snippet is injected into
    pub fn index_path(&self) -> PathBuf {
        self.html_path().join("index.html")
    }

    pub fn snippet_path(&self) -> PathBuf {
        self.docs_dir.join(&self.snippet_file)
    }

    /// Name of the top-level entry of `dst_dir` that contains `docs_dir`,
    /// if any. Clearing must never select it.
    pub fn docs_entry_in_dst(&self) -> Option<String> {
        let rest = self.docs_dir.strip_prefix(&self.dst_dir).ok()?;
        match rest.components().next() {
            Some(Component::Normal(name)) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

fn resolve_path(base: &Path, path: &Path, home: Option<&Path>) -> PathBuf {
    let expanded = match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    };
    if expanded.is_absolute() {
        normalize(&expanded)
    } else {
        normalize(&base.join(expanded))
    }
}

/// Drop `.` components and fold `..` into the preceding component
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
