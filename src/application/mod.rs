//! Application Layer
//!
//! Use cases that orchestrate the publish flow.
//! This layer:
//! - Depends on the Domain layer (ports, services, value objects)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Rebuild, publish to the publish branch, restore
//! - `run_check` - Preflight validation

pub mod check;
pub mod deploy;

pub use check::{run_check, CheckItem, CheckReport, CheckStatus};
pub use deploy::{DeployOptions, DeployReport, DeployUseCase, PlannedStep};
