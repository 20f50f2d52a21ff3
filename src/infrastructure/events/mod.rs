//! Event sink implementations

mod json;

pub use json::{event_to_json, JsonEventSink};
