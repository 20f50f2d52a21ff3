//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// Convert a deploy event to its NDJSON representation
pub fn event_to_json(event: &DeployEvent) -> serde_json::Value {
    let timestamp = chrono::Utc::now().to_rfc3339();
    match event {
        DeployEvent::Started {
            source_branch,
            publish_branch,
            remote,
            dry_run,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "timestamp": timestamp,
            "source_branch": source_branch,
            "publish_branch": publish_branch,
            "remote": remote,
            "dry_run": dry_run,
        }),

        DeployEvent::StepStarted { step } => serde_json::json!({
            "event": "step_start",
            "command": "deploy",
            "timestamp": timestamp,
            "step": step.as_str(),
            "index": step.number(),
        }),

        DeployEvent::StepCompleted { step, detail } => serde_json::json!({
            "event": "step_complete",
            "command": "deploy",
            "timestamp": timestamp,
            "step": step.as_str(),
            "index": step.number(),
            "detail": detail,
        }),

        DeployEvent::StepSkipped { step, reason } => serde_json::json!({
            "event": "step_skipped",
            "command": "deploy",
            "timestamp": timestamp,
            "step": step.as_str(),
            "index": step.number(),
            "reason": reason,
        }),

        DeployEvent::StepFailed { step, error } => serde_json::json!({
            "event": "step_error",
            "command": "deploy",
            "timestamp": timestamp,
            "step": step.as_str(),
            "index": step.number(),
            "error": error,
        }),

        DeployEvent::CleanupFailed { step, error } => serde_json::json!({
            "event": "cleanup_error",
            "command": "deploy",
            "timestamp": timestamp,
            "step": step.as_str(),
            "index": step.number(),
            "error": error,
        }),

        DeployEvent::Completed {
            outcome,
            published_files,
            success,
        } => serde_json::json!({
            "event": "complete",
            "command": "deploy",
            "timestamp": timestamp,
            "status": if *success { "success" } else { "error" },
            "outcome": outcome.as_str(),
            "published_files": published_files,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_to_json(&event));
    }

    fn wants_detailed_events(&self) -> bool {
        true
    }
}
