use pricing_core::analytics::InteractionSink;
use serde_json::Value;

/// Sink that writes one JSON line per event to stderr, keeping stdout clean
/// for the formatted result.
pub struct StderrSink;

impl InteractionSink for StderrSink {
    fn track_interaction(&self, event: &str, payload: &Value) {
        eprintln!(
            "{}",
            serde_json::json!({ "event": event, "payload": payload })
        );
    }
}
