//! Common test utilities for docpub CLI tests.
//!
//! `TestEnv` gives each test an isolated project directory and home
//! directory, and runs the docpub binary inside them.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running a docpub CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment with temp directories
pub struct TestEnv {
    /// Temporary directory for the project (repository root in git tests)
    pub project_root: TempDir,
    /// Temporary directory used as home (holds the default staging dir)
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project dir"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
        }
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    /// Write a file under the project root, creating parent directories
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative)).unwrap_or_default()
    }

    /// Run docpub from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    /// Run docpub from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    /// Run docpub from a specific directory with extra env vars
    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(bin());
        cmd.current_dir(cwd)
            .args(args)
            .env("DOCPUB_TEST_HOME", self.home_dir.path())
            .env("NO_COLOR", "1")
            .env_remove("DOCPUB_REMOTE")
            .env_remove("DOCPUB_BRANCH")
            .env_remove("DOCPUB_TMP_DIR")
            .env_remove("GITHUB_ACTIONS");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute docpub");

        TestResult::from_output(output)
    }

    /// Run git in a directory under the project root, asserting success
    pub fn git(&self, relative: &str, args: &[&str]) -> String {
        let output = Command::new("git")
            .current_dir(self.project_path(relative))
            .args(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute git");
        assert!(
            output.status.success(),
            "git {:?} failed:\n{}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_docpub")
}

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Build command that writes a minimal Sphinx-like tree into `build/html`
pub const FAKE_BUILD: &str = r#"mkdir -p build/html/_static && printf '<html><head><title>t</title></head><body>docs</body></html>' > build/html/index.html && printf 'body {}' > build/html/_static/basic.css && : > build/html/.nojekyll"#;

pub const SNIPPET: &str = "<script>gtag('config', 'G-TEST');</script>";

/// Lay out a repository with the docs project in `repo/docs`:
///
/// - `main` holds the docs sources, a `.gitignore` for the build output
///   and a `docpub.toml`
/// - `gh-pages` branches from `main` and holds a stale `old.html`
/// - `remote.git` is a bare `origin` that has both branches
pub fn setup_docs_repo(env: &TestEnv) {
    env.write("repo/.gitignore", "docs/build/\n");
    env.write("repo/docs/gtag.js", SNIPPET);
    env.write("repo/docs/index.rst", "Docs\n====\n");
    env.write(
        "repo/docs/docpub.toml",
        &format!(
            "[build]\ncommand = [\"sh\", \"-c\", {}]\n",
            toml_string(FAKE_BUILD)
        ),
    );

    env.git("repo", &["init", "--quiet"]);
    env.git("repo", &["checkout", "--quiet", "-b", "main"]);
    env.git("repo", &["config", "user.name", "docpub tests"]);
    env.git("repo", &["config", "user.email", "tests@example.com"]);
    env.git("repo", &["config", "commit.gpgsign", "false"]);
    env.git("repo", &["add", "--all"]);
    env.git("repo", &["commit", "--quiet", "-m", "initial docs"]);

    env.git("repo", &["checkout", "--quiet", "-b", "gh-pages"]);
    env.write("repo/old.html", "<html><head></head>stale</html>");
    env.git("repo", &["add", "--all"]);
    env.git("repo", &["commit", "--quiet", "-m", "stale page"]);
    env.git("repo", &["checkout", "--quiet", "main"]);

    std::fs::create_dir_all(env.project_path("remote.git")).expect("Failed to create remote");
    env.git("remote.git", &["init", "--quiet", "--bare"]);
    let remote = env.project_path("remote.git");
    env.git(
        "repo",
        &["remote", "add", "origin", &remote.display().to_string()],
    );
    env.git("repo", &["push", "--quiet", "origin", "main", "gh-pages"]);
}

/// Quote a value as a TOML basic string
fn toml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
