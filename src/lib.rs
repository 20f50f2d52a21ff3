//! docpub - publish generated documentation to a `gh-pages` branch
//!
//! Rebuilds the docs, injects a tracking snippet into the entry page,
//! switches to the publish branch, replaces the published tree, commits
//! and pushes, then restores the original branch and the local build.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{run_check, CheckReport, DeployOptions, DeployReport, DeployUseCase};
pub use config::Config;
pub use domain::value_objects::{DeployOutcome, DeployStep};
pub use error::{DocpubError, DocpubResult};
