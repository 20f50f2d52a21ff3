//! Home directory resolution with test isolation support.
//!
//! On Windows, `dirs::home_dir()` uses the Windows system API rather than
//! environment variables, so setting `HOME` in tests has no effect there.
//! `docpub_home_dir()` checks `DOCPUB_TEST_HOME` first and falls back to
//! `dirs::home_dir()`.

use std::path::PathBuf;

/// Environment variable for test isolation of home directory.
pub const DOCPUB_TEST_HOME_VAR: &str = "DOCPUB_TEST_HOME";

/// Get the home directory for docpub-internal paths (the default staging
/// directory lives here).
///
/// # Example
///
/// ```
/// use docpub::infrastructure::fs::docpub_home_dir;
///
/// if let Some(home) = docpub_home_dir() {
///     let staging = home.join(".docpub/staging");
/// }
/// ```
pub fn docpub_home_dir() -> Option<PathBuf> {
    std::env::var(DOCPUB_TEST_HOME_VAR)
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
