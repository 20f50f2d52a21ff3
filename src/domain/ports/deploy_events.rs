//! Deploy Event Port
//!
//! Provides an observable interface for deploy runs.
//! Enables progress reporting, JSON event streams, and debugging.

use crate::domain::value_objects::{DeployOutcome, DeployStep};

/// Event emitted during a deploy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployEvent {
    /// Deploy started
    Started {
        source_branch: Option<String>,
        publish_branch: String,
        remote: String,
        dry_run: bool,
    },

    /// A step began running
    StepStarted { step: DeployStep },

    /// A step finished; `detail` summarizes what it did
    StepCompleted {
        step: DeployStep,
        detail: Option<String>,
    },

    /// A step was not run
    StepSkipped { step: DeployStep, reason: String },

    /// A pipeline step failed; the remaining pipeline steps are abandoned
    StepFailed { step: DeployStep, error: String },

    /// A cleanup step failed
    CleanupFailed { step: DeployStep, error: String },

    /// Deploy finished (successfully or not)
    Completed {
        outcome: DeployOutcome,
        published_files: usize,
        success: bool,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants per-step events
    ///
    /// Some sinks (like CI) may only want summary events.
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
