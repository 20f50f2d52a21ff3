//! DocBuilder port - the documentation build tool

use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("build command is empty")]
    EmptyCommand,

    #[error("failed to start `{program}`: {message}")]
    Spawn { program: String, message: String },

    #[error("`{command}` {}{}", describe_exit(.code), format_stderr(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Abstract documentation builder
pub trait DocBuilder {
    /// Regenerate HTML output for the docs project in `docs_dir`
    fn build_html(&self, docs_dir: &Path) -> Result<(), BuildError>;

    /// Human-readable form of the build invocation (for plans and logs)
    fn describe(&self) -> String;

    /// Whether the build tool can be started at all
    fn is_available(&self) -> bool {
        true
    }
}
