//! Domain Services
//!
//! Stateless transformations used by the deploy pipeline.

mod commit_message;
mod snippet;

pub use commit_message::render_commit_message;
pub use snippet::inject_after_marker;
