//! File System Implementations
//!
//! Concrete implementations of the FileSystem port.

mod home;
mod local;

pub use home::{docpub_home_dir, DOCPUB_TEST_HOME_VAR};
pub use local::LocalFs;
