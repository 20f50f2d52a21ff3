//! Subcommand implementations

pub mod check;
pub mod config;
pub mod deploy;

use std::path::PathBuf;

use anyhow::{Context, Result};
use docpub::config::{self as docpub_config, Config, ConfigWarning, LoadedConfig};
use docpub::infrastructure::fs::docpub_home_dir;
use docpub::DeployOptions;

use crate::cli::ConfigArgs;

/// Configuration with command-line overrides applied, and the deploy
/// options it resolves to
pub struct Settings {
    pub config: Config,
    pub config_file: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
    pub options: DeployOptions,
}

/// Load config (file, then env, then flags) and resolve paths
pub fn load_settings(args: &ConfigArgs) -> Result<Settings> {
    let cwd = std::env::current_dir().context("failed to read the current directory")?;

    let loaded: LoadedConfig = match &args.config {
        Some(path) => {
            let path = cwd.join(path);
            docpub_config::load_explicit(&path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => {
            let dir = args
                .docs_dir
                .as_ref()
                .map(|d| cwd.join(d))
                .unwrap_or_else(|| cwd.clone());
            docpub_config::discover(&dir)?
        }
    };

    let base = loaded.base_dir(&cwd);
    let LoadedConfig {
        mut config,
        path: config_file,
        warnings,
    } = loaded;

    // Flag paths are relative to where docpub was started
    if let Some(dir) = &args.docs_dir {
        config.paths.docs_dir = Some(cwd.join(dir));
    }
    if let Some(dir) = &args.dst_dir {
        config.paths.dst_dir = Some(cwd.join(dir));
    }
    if let Some(dir) = &args.tmp_dir {
        config.paths.tmp_dir = Some(cwd.join(dir));
    }
    if let Some(remote) = &args.remote {
        config.git.remote = remote.clone();
    }
    if let Some(branch) = &args.branch {
        config.git.branch = branch.clone();
    }

    let options = DeployOptions::from_config(&config, &base, docpub_home_dir().as_deref())?;

    Ok(Settings {
        config,
        config_file,
        warnings,
        options,
    })
}

/// Report unknown config keys on stderr
pub fn print_config_warnings(warnings: &[ConfigWarning], json: bool) {
    for w in warnings {
        if json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "warning",
                "kind": "unknown_config_key",
                "key": w.key,
                "file": w.file.display().to_string(),
                "line": w.line,
                "suggestion": w.suggestion,
            }));
            continue;
        }

        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        match &w.suggestion {
            Some(s) => eprintln!(
                "warning: unknown config key '{}' in {} (did you mean '{}'?)",
                w.key, location, s
            ),
            None => eprintln!("warning: unknown config key '{}' in {}", w.key, location),
        }
    }
}
