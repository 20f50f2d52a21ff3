//! Check Use Case
//!
//! Preflight validation of a deploy: everything step 1 of the pipeline
//! would refuse, plus the inputs later steps need.

use crate::domain::ports::{DocBuilder, FileSystem, VersionControl};
use crate::domain::value_objects::PublishPatterns;

use super::deploy::DeployOptions;

/// Result of a single check
#[derive(Debug, Clone)]
pub struct CheckItem {
    /// Name of the check
    pub name: String,
    pub status: CheckStatus,
    /// Human-readable message
    pub message: String,
    /// Recommendation for fixing issues
    pub recommendation: Option<String>,
}

/// Status of a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warning,
    Error,
}

impl CheckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warning",
            CheckStatus::Error => "error",
        }
    }
}

/// Result of the check operation
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub items: Vec<CheckItem>,
    pub passed: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl CheckReport {
    /// No errors (warnings allowed)
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    pub fn is_clean(&self) -> bool {
        self.errors == 0 && self.warnings == 0
    }

    fn push(
        &mut self,
        name: &str,
        status: CheckStatus,
        message: impl Into<String>,
        recommendation: Option<&str>,
    ) {
        match status {
            CheckStatus::Pass => self.passed += 1,
            CheckStatus::Warning => self.warnings += 1,
            CheckStatus::Error => self.errors += 1,
        }
        self.items.push(CheckItem {
            name: name.to_string(),
            status,
            message: message.into(),
            recommendation: recommendation.map(str::to_string),
        });
    }

    fn pass(&mut self, name: &str, message: impl Into<String>) {
        self.push(name, CheckStatus::Pass, message, None);
    }

    fn warn(&mut self, name: &str, message: impl Into<String>, recommendation: &str) {
        self.push(name, CheckStatus::Warning, message, Some(recommendation));
    }

    fn error(&mut self, name: &str, message: impl Into<String>, recommendation: &str) {
        self.push(name, CheckStatus::Error, message, Some(recommendation));
    }
}

/// Validate that a deploy with `options` can start
pub fn run_check(
    options: &DeployOptions,
    vcs: &dyn VersionControl,
    fs: &dyn FileSystem,
    builder: &dyn DocBuilder,
) -> CheckReport {
    let mut report = CheckReport::default();

    check_git(options, vcs, &mut report);

    let snippet = options.snippet_path();
    if fs.exists(&snippet) {
        report.pass("snippet", snippet.display().to_string());
    } else {
        report.error(
            "snippet",
            format!("{} not found", snippet.display()),
            "create the tracking snippet file or set build.snippet_file",
        );
    }

    if builder.is_available() {
        report.pass("build command", builder.describe());
    } else {
        report.error(
            "build command",
            format!("`{}` cannot be started", builder.describe()),
            "install the build tool or set build.command",
        );
    }

    match PublishPatterns::new(&options.clear).and_then(|_| PublishPatterns::new(&options.prune)) {
        Ok(_) => report.pass(
            "publish patterns",
            format!(
                "{} clear, {} prune",
                options.clear.len(),
                options.prune.len()
            ),
        ),
        Err(e) => report.error(
            "publish patterns",
            e.to_string(),
            "fix publish.clear / publish.prune",
        ),
    }

    if fs.exists(&options.tmp_dir) {
        report.warn(
            "staging",
            format!("{} already exists", options.tmp_dir.display()),
            "it is left over from an earlier run and will be replaced",
        );
    } else {
        report.pass("staging", options.tmp_dir.display().to_string());
    }

    report
}

fn check_git(options: &DeployOptions, vcs: &dyn VersionControl, report: &mut CheckReport) {
    if !vcs.is_repository() {
        report.error(
            "repository",
            format!("{} is not inside a git repository", options.dst_dir.display()),
            "run docpub from a git checkout",
        );
        return;
    }
    report.pass("repository", "git repository found");

    match vcs.current_branch() {
        Ok(branch) if branch == options.publish_branch => report.error(
            "current branch",
            format!("on publish branch '{}'", branch),
            "check out the branch whose docs should be published",
        ),
        Ok(branch) => report.pass("current branch", branch),
        Err(e) => report.error(
            "current branch",
            e.to_string(),
            "check out a branch before deploying",
        ),
    }

    match vcs.branch_exists(&options.publish_branch) {
        Ok(true) => report.pass("publish branch", options.publish_branch.clone()),
        Ok(false) => report.error(
            "publish branch",
            format!("branch '{}' does not exist locally", options.publish_branch),
            "create it, e.g. `git branch gh-pages origin/gh-pages`",
        ),
        Err(e) => report.error("publish branch", e.to_string(), "check the repository"),
    }

    match vcs.remote_exists(&options.remote) {
        Ok(true) => report.pass("remote", options.remote.clone()),
        Ok(false) => report.warn(
            "remote",
            format!("remote '{}' is not configured", options.remote),
            "add the remote, or deploy with --no-push",
        ),
        Err(e) => report.error("remote", e.to_string(), "check the repository"),
    }

    match vcs.is_clean() {
        Ok(true) => report.pass("working tree", "clean"),
        Ok(false) => report.warn(
            "working tree",
            "uncommitted changes to tracked files",
            "commit or stash them, or deploy with --allow-dirty",
        ),
        Err(e) => report.error("working tree", e.to_string(), "check the repository"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        BuildError, CommitOutcome, DirEntry, FsError, FsResult, VcsError, VcsResult,
    };
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};

    struct StubVcs {
        repository: bool,
        branch: VcsResult<String>,
        branches: Vec<&'static str>,
        remotes: Vec<&'static str>,
        clean: bool,
    }

    impl StubVcs {
        fn healthy() -> Self {
            Self {
                repository: true,
                branch: Ok("main".to_string()),
                branches: vec!["main", "gh-pages"],
                remotes: vec!["origin"],
                clean: true,
            }
        }
    }

    impl VersionControl for StubVcs {
        fn is_repository(&self) -> bool {
            self.repository
        }

        fn current_branch(&self) -> VcsResult<String> {
            match &self.branch {
                Ok(b) => Ok(b.clone()),
                Err(_) => Err(VcsError::DetachedHead),
            }
        }

        fn last_commit_oneline(&self, _branch: &str) -> VcsResult<String> {
            Ok("abc1234 subject".to_string())
        }

        fn branch_exists(&self, branch: &str) -> VcsResult<bool> {
            Ok(self.branches.contains(&branch))
        }

        fn remote_exists(&self, remote: &str) -> VcsResult<bool> {
            Ok(self.remotes.contains(&remote))
        }

        fn is_clean(&self) -> VcsResult<bool> {
            Ok(self.clean)
        }

        fn checkout(&self, _branch: &str) -> VcsResult<()> {
            unreachable!("check never checks out")
        }

        fn stage_all(&self) -> VcsResult<()> {
            unreachable!("check never stages")
        }

        fn commit(&self, _message: &str) -> VcsResult<CommitOutcome> {
            unreachable!("check never commits")
        }

        fn push(&self, _remote: &str, _branch: &str) -> VcsResult<()> {
            unreachable!("check never pushes")
        }
    }

    struct StubFs {
        existing: HashSet<PathBuf>,
    }

    impl FileSystem for StubFs {
        fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
            Err(FsError::NotFound(path.to_path_buf()))
        }

        fn write(&self, _path: &Path, _content: &[u8]) -> FsResult<()> {
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.existing.contains(path)
        }

        fn remove_all(&self, _path: &Path) -> FsResult<()> {
            Ok(())
        }

        fn create_dir_all(&self, _path: &Path) -> FsResult<()> {
            Ok(())
        }

        fn copy_dir_contents(&self, _from: &Path, _to: &Path) -> FsResult<()> {
            Ok(())
        }

        fn list_entries(&self, _dir: &Path) -> FsResult<Vec<DirEntry>> {
            Ok(Vec::new())
        }

        fn list_files(&self, _dir: &Path) -> FsResult<Vec<PathBuf>> {
            Ok(Vec::new())
        }
    }

    struct StubBuilder(bool);

    impl DocBuilder for StubBuilder {
        fn build_html(&self, _docs_dir: &Path) -> Result<(), BuildError> {
            Ok(())
        }

        fn describe(&self) -> String {
            "make html".to_string()
        }

        fn is_available(&self) -> bool {
            self.0
        }
    }

    fn options() -> DeployOptions {
        DeployOptions::new("/repo/docs", "/repo", "/home/u/.docpub/staging")
    }

    fn fs_with_snippet() -> StubFs {
        StubFs {
            existing: [PathBuf::from("/repo/docs/gtag.js")].into_iter().collect(),
        }
    }

    fn status_of(report: &CheckReport, name: &str) -> CheckStatus {
        report
            .items
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.status)
            .unwrap_or_else(|| panic!("no check named {}", name))
    }

    #[test]
    fn healthy_setup_is_clean() {
        let report = run_check(
            &options(),
            &StubVcs::healthy(),
            &fs_with_snippet(),
            &StubBuilder(true),
        );
        assert!(report.is_clean(), "{:?}", report.items);
        assert_eq!(report.passed, report.items.len());
    }

    #[test]
    fn outside_repository_skips_git_checks() {
        let vcs = StubVcs {
            repository: false,
            ..StubVcs::healthy()
        };
        let report = run_check(&options(), &vcs, &fs_with_snippet(), &StubBuilder(true));

        assert!(!report.is_success());
        assert_eq!(status_of(&report, "repository"), CheckStatus::Error);
        assert!(report.items.iter().all(|i| i.name != "current branch"));
    }

    #[test]
    fn on_publish_branch_is_an_error() {
        let vcs = StubVcs {
            branch: Ok("gh-pages".to_string()),
            ..StubVcs::healthy()
        };
        let report = run_check(&options(), &vcs, &fs_with_snippet(), &StubBuilder(true));
        assert_eq!(status_of(&report, "current branch"), CheckStatus::Error);
    }

    #[test]
    fn detached_head_is_an_error() {
        let vcs = StubVcs {
            branch: Err(VcsError::DetachedHead),
            ..StubVcs::healthy()
        };
        let report = run_check(&options(), &vcs, &fs_with_snippet(), &StubBuilder(true));
        assert_eq!(status_of(&report, "current branch"), CheckStatus::Error);
    }

    #[test]
    fn missing_remote_and_dirty_tree_are_warnings() {
        let vcs = StubVcs {
            remotes: vec![],
            clean: false,
            ..StubVcs::healthy()
        };
        let report = run_check(&options(), &vcs, &fs_with_snippet(), &StubBuilder(true));

        assert!(report.is_success());
        assert_eq!(report.warnings, 2);
        assert_eq!(status_of(&report, "remote"), CheckStatus::Warning);
        assert_eq!(status_of(&report, "working tree"), CheckStatus::Warning);
    }

    #[test]
    fn missing_inputs_are_errors() {
        let fs = StubFs {
            existing: HashSet::new(),
        };
        let vcs = StubVcs {
            branches: vec!["main"],
            ..StubVcs::healthy()
        };
        let report = run_check(&options(), &vcs, &fs, &StubBuilder(false));

        assert_eq!(report.errors, 3);
        assert_eq!(status_of(&report, "snippet"), CheckStatus::Error);
        assert_eq!(status_of(&report, "build command"), CheckStatus::Error);
        assert_eq!(status_of(&report, "publish branch"), CheckStatus::Error);
    }

    #[test]
    fn leftover_staging_is_a_warning() {
        let mut fs = fs_with_snippet();
        fs.existing.insert(PathBuf::from("/home/u/.docpub/staging"));
        let report = run_check(&options(), &StubVcs::healthy(), &fs, &StubBuilder(true));
        assert_eq!(status_of(&report, "staging"), CheckStatus::Warning);
    }
}
