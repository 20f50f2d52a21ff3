//! Command-based documentation builder
//!
//! Runs the configured build command (e.g. `make html`) inside the docs
//! directory.

use std::env;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::domain::ports::{BuildError, DocBuilder};

/// DocBuilder that shells out to an external build command
#[derive(Debug, Clone)]
pub struct CommandDocBuilder {
    command: Vec<String>,
    /// Suppress the tool's stdout (JSON mode keeps stdout for events)
    quiet: bool,
}

impl CommandDocBuilder {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            quiet: false,
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }
}

impl DocBuilder for CommandDocBuilder {
    fn build_html(&self, docs_dir: &Path) -> Result<(), BuildError> {
        let (program, args) = self.command.split_first().ok_or(BuildError::EmptyCommand)?;

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(docs_dir).stdin(Stdio::null());

        if self.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let mut child = cmd.spawn().map_err(|e| BuildError::Spawn {
            program: program.clone(),
            message: e.to_string(),
        })?;

        let mut stderr = String::new();
        if let Some(mut pipe) = child.stderr.take() {
            let _ = pipe.read_to_string(&mut stderr);
        }

        let status = child.wait().map_err(|e| BuildError::Spawn {
            program: program.clone(),
            message: e.to_string(),
        })?;

        if !status.success() {
            return Err(BuildError::Failed {
                command: self.describe(),
                code: status.code(),
                stderr,
            });
        }

        Ok(())
    }

    fn describe(&self) -> String {
        self.command.join(" ")
    }

    fn is_available(&self) -> bool {
        match self.command.first() {
            Some(program) => find_program(program).is_some(),
            None => false,
        }
    }
}

/// Resolve a program name the way the shell would, through `PATH`
fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths).find_map(|dir| {
        let full = dir.join(program);
        if full.is_file() {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = full.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}
