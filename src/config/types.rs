//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DocpubResult;

use super::loader::{self, ConfigWarning};

/// Filesystem layout of a deploy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Docs project directory (defaults to the directory docpub runs in)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_dir: Option<PathBuf>,

    /// Root of the published tree (defaults to the parent of `docs_dir`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dst_dir: Option<PathBuf>,

    /// Temp staging directory (defaults to `~/.docpub/staging`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmp_dir: Option<PathBuf>,

    /// Build output directory, relative to `docs_dir`
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// HTML output directory, relative to `build_dir`
    #[serde(default = "default_html_subdir")]
    pub html_subdir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            docs_dir: None,
            dst_dir: None,
            tmp_dir: None,
            build_dir: default_build_dir(),
            html_subdir: default_html_subdir(),
        }
    }
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_html_subdir() -> PathBuf {
    PathBuf::from("html")
}

/// Documentation build and tracking snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build tool invocation, run inside `docs_dir`
    #[serde(default = "default_build_command")]
    pub command: Vec<String>,

    /// Tracking snippet file, relative to `docs_dir`
    #[serde(default = "default_snippet_file")]
    pub snippet_file: PathBuf,

    /// Literal text the snippet is inserted after
    #[serde(default = "default_snippet_marker")]
    pub snippet_marker: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: default_build_command(),
            snippet_file: default_snippet_file(),
            snippet_marker: default_snippet_marker(),
        }
    }
}

fn default_build_command() -> Vec<String> {
    vec!["make".to_string(), "html".to_string()]
}

fn default_snippet_file() -> PathBuf {
    PathBuf::from("gtag.js")
}

fn default_snippet_marker() -> String {
    "<head>".to_string()
}

/// Publish branch and remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    /// Commit message template; `{log}`, `{branch}` and `{source}` are
    /// substituted
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            branch: default_branch(),
            commit_message: default_commit_message(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "gh-pages".to_string()
}

fn default_commit_message() -> String {
    "Generated {branch} for {log}".to_string()
}

/// Which entries of the published tree are replaced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Stale entries removed from `dst_dir` before copying (gitignore syntax)
    #[serde(default = "default_clear")]
    pub clear: Vec<String>,

    /// Entries removed from `dst_dir` after copying (legacy directories)
    #[serde(default)]
    pub prune: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            clear: default_clear(),
            prune: Vec::new(),
        }
    }
}

fn default_clear() -> Vec<String> {
    [
        ".buildinfo",
        ".nojekyll",
        "_*",
        "*.html",
        "*.js",
        "objects.inv",
        "packages",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Combine with a `-v` count from the command line; the louder wins
    pub fn with_flag_count(self, count: u8) -> Self {
        let from_flags = match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        };
        self.max(from_flags)
    }
}

/// Main configuration structure (`docpub.toml`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub publish: PublishConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DocpubResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect unknown-key warnings
    pub fn load_with_warnings(path: &Path) -> DocpubResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Find `docpub.toml` in `dir`, falling back to defaults, then apply
    /// `DOCPUB_*` environment overrides
    pub fn discover(dir: &Path) -> DocpubResult<loader::LoadedConfig> {
        loader::discover(dir)
    }

    /// Apply environment variable overrides (DOCPUB_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Serialize back to TOML
    pub fn to_toml(&self) -> DocpubResult<String> {
        toml::to_string_pretty(self).map_err(|e| crate::error::DocpubError::InvalidConfig {
            file: PathBuf::from(loader::CONFIG_FILE_NAME),
            message: e.to_string(),
        })
    }
}
