use serde::Serialize;
use serde_json::Value;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &str, payload: Value);
}

pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: &str, _payload: Value) {}
}

/// Forwards events to the log at debug level
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, event: &str, payload: Value) {
        log::debug!("event {event}: {payload}");
    }
}

pub fn emit_event<T: Serialize>(sink: &dyn EventSink, event: &str, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => sink.emit(event, value),
        Err(e) => log::warn!("Failed to serialize '{event}' payload: {e}"),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Keeps every emitted event for assertions
    #[derive(Default)]
    pub struct RecordingSink {
        pub events: Mutex<Vec<(String, Value)>>,
    }

    impl RecordingSink {
        pub fn names(&self) -> Vec<String> {
            self.events.lock().unwrap().iter().map(|(name, _)| name.clone()).collect()
        }

        pub fn last(&self) -> Option<(String, Value)> {
            self.events.lock().unwrap().last().cloned()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: &str, payload: Value) {
            self.events.lock().unwrap().push((event.to_string(), payload));
        }
    }
}
