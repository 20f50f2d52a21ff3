//! Deploy Module
//!
//! Orchestrates a publish run for docpub.
//!
//! ## Structure
//!
//! - `options` - Resolved settings of a run (`DeployOptions`)
//! - `result` - Run report (`DeployReport`)
//! - `use_case` - Step pipeline and cleanup (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use docpub::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(fs, git, builder);
//! let report = use_case.execute(&DeployOptions::new(docs, dst, tmp));
//! ```

mod options;
mod result;
mod use_case;

pub use options::{DeployOptions, DEFAULT_STAGING_DIR};
pub use result::DeployReport;
pub use use_case::{DeployUseCase, PlannedStep};
