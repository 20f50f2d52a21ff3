//! Deploy Result
//!
//! Report of a deploy run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{DeployOutcome, DeployStep};
use crate::error::DocpubError;

/// Result of a deploy run
#[derive(Debug)]
pub struct DeployReport {
    /// Branch checked out when the run started
    pub source_branch: Option<String>,
    /// One-line log entry of the source branch tip
    pub source_log: Option<String>,
    pub outcome: DeployOutcome,
    /// Steps that ran to completion, in order
    pub completed_steps: Vec<DeployStep>,
    /// Number of files copied into the published tree
    pub published_files: usize,
    /// The pipeline failure, wrapped in `DocpubError::StepFailed`
    pub error: Option<DocpubError>,
    /// Failures of the cleanup steps
    pub cleanup_errors: Vec<(DeployStep, DocpubError)>,
    /// Staging directory left in place because restoring from it failed
    pub staging_kept: Option<PathBuf>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl DeployReport {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            source_branch: None,
            source_log: None,
            outcome: DeployOutcome::Planned,
            completed_steps: Vec::new(),
            published_files: 0,
            error: None,
            cleanup_errors: Vec::new(),
            staging_kept: None,
            started_at: now,
            finished_at: now,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.cleanup_errors.is_empty()
    }

    pub fn has_completed(&self, step: DeployStep) -> bool {
        self.completed_steps.contains(&step)
    }

    /// The step the pipeline stopped at, if it failed
    pub fn failed_step(&self) -> Option<DeployStep> {
        self.error.as_ref().and_then(DocpubError::failed_step)
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

impl Default for DeployReport {
    fn default() -> Self {
        Self::new()
    }
}
