//! Configuration management for docpub
//!
//! Supports a `docpub.toml` in the docs directory (or a file named with
//! `--config`), `DOCPUB_*` environment overrides, and CLI flags.
//! Precedence: flags > environment > file > defaults.

mod loader;
mod types;


pub use loader::{
    discover, load_explicit, load_with_warnings, ConfigWarning, LoadedConfig, CONFIG_FILE_NAME,
};
pub use types::{
    BuildConfig, ColorMode, Config, GitConfig, OutputConfig, PathsConfig, PublishConfig,
    Verbosity,
};
