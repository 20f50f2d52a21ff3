//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod deploy_events;
pub mod doc_builder;
pub mod file_system;
pub mod version_control;

pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use doc_builder::{BuildError, DocBuilder};
pub use file_system::{DirEntry, FileSystem, FsError, FsResult};
pub use version_control::{CommitOutcome, VcsError, VcsResult, VersionControl};
