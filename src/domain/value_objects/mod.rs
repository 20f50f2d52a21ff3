//! Value Objects
//!
//! Immutable types with no identity, compared by value.

mod deploy_step;
mod publish_patterns;

pub use deploy_step::{DeployOutcome, DeployStep};
pub use publish_patterns::{PatternError, PublishPatterns, PROTECTED_ENTRIES};
