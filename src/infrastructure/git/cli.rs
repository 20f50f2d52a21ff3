//! Git CLI adapter
//!
//! Implements the VersionControl port by running the `git` binary.

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use crate::domain::ports::{CommitOutcome, VcsError, VcsResult, VersionControl};

/// VersionControl backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Directory git commands run in (any directory inside the work tree)
    cwd: PathBuf,
    program: String,
}

impl GitCli {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            program: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Check if git is installed and runnable
    pub fn check_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn output(&self, args: &[&str]) -> VcsResult<Output> {
        Command::new(&self.program)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| VcsError::Spawn(e.to_string()))
    }

    /// Run git and return trimmed stdout, failing on a non-zero exit
    fn run(&self, args: &[&str]) -> VcsResult<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(command_failed(args, &output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Run git and report whether it exited zero
    fn succeeds(&self, args: &[&str]) -> VcsResult<bool> {
        Ok(self.output(args)?.status.success())
    }
}

fn command_failed(args: &[&str], output: &Output) -> VcsError {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stderr = if stderr.is_empty() {
        format!("exit code {:?}", output.status.code())
    } else {
        stderr
    };
    VcsError::CommandFailed {
        command: args.join(" "),
        stderr,
    }
}

impl VersionControl for GitCli {
    fn is_repository(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"])
            .map(|out| out == "true")
            .unwrap_or(false)
    }

    fn current_branch(&self) -> VcsResult<String> {
        let output = self.output(&["symbolic-ref", "--quiet", "--short", "HEAD"])?;
        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout).trim().to_string()),
            // symbolic-ref --quiet exits 1 (and prints nothing) on a detached HEAD
            Some(1) if output.stderr.is_empty() => Err(VcsError::DetachedHead),
            _ => Err(command_failed(
                &["symbolic-ref", "--quiet", "--short", "HEAD"],
                &output,
            )),
        }
    }

    fn last_commit_oneline(&self, branch: &str) -> VcsResult<String> {
        self.run(&["log", "-1", "--no-color", "--format=%h %s", branch, "--"])
    }

    fn branch_exists(&self, branch: &str) -> VcsResult<bool> {
        let reference = format!("refs/heads/{}", branch);
        self.succeeds(&["rev-parse", "--verify", "--quiet", &reference])
    }

    fn remote_exists(&self, remote: &str) -> VcsResult<bool> {
        let remotes = self.run(&["remote"])?;
        Ok(remotes.lines().any(|line| line.trim() == remote))
    }

    fn is_clean(&self) -> VcsResult<bool> {
        let status = self.run(&["status", "--porcelain", "--untracked-files=no"])?;
        Ok(status.is_empty())
    }

    fn checkout(&self, branch: &str) -> VcsResult<()> {
        self.run(&["checkout", branch]).map(|_| ())
    }

    fn stage_all(&self) -> VcsResult<()> {
        self.run(&["add", "--all"]).map(|_| ())
    }

    fn commit(&self, message: &str) -> VcsResult<CommitOutcome> {
        // `diff --cached --quiet` exits 0 when nothing is staged, 1 when something is
        let staged = self.output(&["diff", "--cached", "--quiet"])?;
        match staged.status.code() {
            Some(0) => return Ok(CommitOutcome::NothingToCommit),
            Some(1) => {}
            _ => return Err(command_failed(&["diff", "--cached", "--quiet"], &staged)),
        }

        self.run(&["commit", "--quiet", "-m", message])?;
        Ok(CommitOutcome::Committed)
    }

    fn push(&self, remote: &str, branch: &str) -> VcsResult<()> {
        self.run(&["push", remote, branch]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::process::Command;
    use tempfile::tempdir;

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }

    /// Repository with one commit on `main`, or None when git is unavailable
    fn init_repo(dir: &Path) -> Option<GitCli> {
        let cli = GitCli::new(dir);
        if !cli.check_available() {
            return None;
        }
        git(dir, &["init", "--quiet"]);
        git(dir, &["checkout", "--quiet", "-b", "main"]);
        git(dir, &["config", "user.name", "Docs Bot"]);
        git(dir, &["config", "user.email", "docs@example.com"]);
        git(dir, &["config", "commit.gpgsign", "false"]);
        std::fs::write(dir.join("README.md"), "hello\n").unwrap();
        git(dir, &["add", "README.md"]);
        git(dir, &["commit", "--quiet", "-m", "Initial commit"]);
        Some(cli)
    }

    #[test]
    fn missing_program_is_not_available() {
        let cli = GitCli::new(".").with_program("definitely-not-a-git-binary");
        assert!(!cli.check_available());
        assert!(!cli.is_repository());
    }

    #[test]
    fn reads_branch_and_log_line() {
        let dir = tempdir().unwrap();
        let Some(cli) = init_repo(dir.path()) else {
            return;
        };

        assert!(cli.is_repository());
        assert_eq!(cli.current_branch().unwrap(), "main");
        let log = cli.last_commit_oneline("main").unwrap();
        assert!(log.ends_with(" Initial commit"), "unexpected log line: {}", log);
        assert!(cli.branch_exists("main").unwrap());
        assert!(!cli.branch_exists("gh-pages").unwrap());
        assert!(!cli.remote_exists("origin").unwrap());
    }

    #[test]
    fn commit_reports_nothing_to_commit() {
        let dir = tempdir().unwrap();
        let Some(cli) = init_repo(dir.path()) else {
            return;
        };

        cli.stage_all().unwrap();
        assert_eq!(cli.commit("empty").unwrap(), CommitOutcome::NothingToCommit);

        std::fs::write(dir.path().join("index.html"), "<head></head>").unwrap();
        cli.stage_all().unwrap();
        assert_eq!(cli.commit("add page").unwrap(), CommitOutcome::Committed);
        assert!(cli.last_commit_oneline("main").unwrap().ends_with(" add page"));
    }

    #[test]
    fn is_clean_ignores_untracked_files() {
        let dir = tempdir().unwrap();
        let Some(cli) = init_repo(dir.path()) else {
            return;
        };

        std::fs::create_dir_all(dir.path().join("build")).unwrap();
        std::fs::write(dir.path().join("build/index.html"), "x").unwrap();
        assert!(cli.is_clean().unwrap());

        std::fs::write(dir.path().join("README.md"), "changed\n").unwrap();
        assert!(!cli.is_clean().unwrap());
    }

    #[test]
    fn detached_head_is_reported() {
        let dir = tempdir().unwrap();
        let Some(cli) = init_repo(dir.path()) else {
            return;
        };

        git(dir.path(), &["checkout", "--quiet", "--detach"]);
        assert!(matches!(cli.current_branch(), Err(VcsError::DetachedHead)));
    }

    #[test]
    fn checkout_unknown_branch_fails_with_command() {
        let dir = tempdir().unwrap();
        let Some(cli) = init_repo(dir.path()) else {
            return;
        };

        let err = cli.checkout("gh-pages").unwrap_err();
        match err {
            VcsError::CommandFailed { command, .. } => assert_eq!(command, "checkout gh-pages"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
