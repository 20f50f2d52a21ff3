//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports: local disk, the `git`
//! binary, the external doc build command, and event output.

pub mod builder;
pub mod events;
pub mod fs;
pub mod git;
pub mod lock;

pub use builder::CommandDocBuilder;
pub use events::JsonEventSink;
pub use fs::LocalFs;
pub use git::GitCli;
pub use lock::RunLock;
