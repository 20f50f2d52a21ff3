//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocpubError, DocpubResult};

use super::types::{ColorMode, Config, Verbosity};

/// File name looked up in the docs directory
pub const CONFIG_FILE_NAME: &str = "docpub.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Result of config discovery
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// The file the config came from, if any
    pub path: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

impl LoadedConfig {
    /// Directory relative config paths are resolved against
    pub fn base_dir(&self, fallback: &Path) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| fallback.to_path_buf())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DocpubResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DocpubError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `docpub.toml` from `dir` if present, else defaults; env overrides
/// are applied either way.
pub fn discover(dir: &Path) -> DocpubResult<LoadedConfig> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        let (config, warnings) = load_with_warnings(&candidate)?;
        return Ok(LoadedConfig {
            config: with_env_overrides(config),
            path: Some(candidate),
            warnings,
        });
    }

    Ok(LoadedConfig {
        config: with_env_overrides(Config::default()),
        path: None,
        warnings: Vec::new(),
    })
}

/// Load an explicitly named config file; env overrides are applied.
pub fn load_explicit(path: &Path) -> DocpubResult<LoadedConfig> {
    let (config, warnings) = load_with_warnings(path)?;
    Ok(LoadedConfig {
        config: with_env_overrides(config),
        path: Some(path.to_path_buf()),
        warnings,
    })
}

/// Apply environment variable overrides (DOCPUB_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

fn with_env_overrides_from(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    // DOCPUB_REMOTE
    if let Some(remote) = get_env("DOCPUB_REMOTE").filter(|v| !v.trim().is_empty()) {
        config.git.remote = remote.trim().to_string();
    }

    // DOCPUB_BRANCH
    if let Some(branch) = get_env("DOCPUB_BRANCH").filter(|v| !v.trim().is_empty()) {
        config.git.branch = branch.trim().to_string();
    }

    // DOCPUB_TMP_DIR
    if let Some(tmp) = get_env("DOCPUB_TMP_DIR").filter(|v| !v.trim().is_empty()) {
        config.paths.tmp_dir = Some(PathBuf::from(tmp));
    }

    // DOCPUB_VERBOSITY
    if let Some(verbosity) = get_env("DOCPUB_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    // DOCPUB_COLOR
    if let Some(color) = get_env("DOCPUB_COLOR") {
        config.output.color = match color.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "docs_dir",
        "dst_dir",
        "tmp_dir",
        "build_dir",
        "html_subdir",
        "build",
        "command",
        "snippet_file",
        "snippet_marker",
        "git",
        "remote",
        "branch",
        "commit_message",
        "publish",
        "clear",
        "prune",
        "output",
        "verbosity",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
pub(super) fn env_overrides_for_test(config: Config, vars: &[(&str, &str)]) -> Config {
    with_env_overrides_from(config, |key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
}

#[cfg(test)]
pub(super) fn suggest_key_for_test(unknown: &str) -> Option<String> {
    suggest_key(unknown)
}
