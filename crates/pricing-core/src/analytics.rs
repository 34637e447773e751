use serde_json::Value;

/// Fire-and-forget interaction tracking.
///
/// The calculators never import a sink; callers inject one wherever
/// pricing-page telemetry is wanted. There is no return contract — an
/// implementation that fails must swallow the failure.
pub trait InteractionSink {
    fn track_interaction(&self, event: &str, payload: &Value);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl InteractionSink for NullSink {
    fn track_interaction(&self, _event: &str, _payload: &Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    struct RecordingSink {
        events: RefCell<Vec<(String, Value)>>,
    }

    impl InteractionSink for RecordingSink {
        fn track_interaction(&self, event: &str, payload: &Value) {
            self.events
                .borrow_mut()
                .push((event.to_string(), payload.clone()));
        }
    }

    #[test]
    fn test_injected_sink_receives_events() {
        let sink = RecordingSink {
            events: RefCell::new(Vec::new()),
        };
        sink.track_interaction("roi_calculated", &json!({ "plan": "professional" }));
        sink.track_interaction("tier_selected", &json!({ "tier": "scale" }));

        let events = sink.events.borrow();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, "roi_calculated");
        assert_eq!(events[1].1["tier"], "scale");
    }

    #[test]
    fn test_null_sink_is_a_no_op() {
        // Must not panic or block; there is nothing else to observe.
        NullSink.track_interaction("anything", &json!(null));
    }
}
