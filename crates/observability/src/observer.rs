//! Structured observations emitted by services.
//!
//! Services do not log through a global; they receive an [`Observer`] and hand
//! it one [`Observation`] per business fact. Production wiring forwards to
//! `tracing`; tests capture into memory and assert on what was observed.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservationLevel {
    Info,
    Warn,
}

/// One structured record: a stable event name plus a JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub event_type: &'static str,
    pub level: ObservationLevel,
    pub occurred_at: DateTime<Utc>,
    pub payload: JsonValue,
}

impl Observation {
    pub fn new(event_type: &'static str, payload: &impl Serialize) -> Self {
        let payload = serde_json::to_value(payload)
            .unwrap_or_else(|e| serde_json::json!({ "serialize_error": e.to_string() }));
        Self {
            event_type,
            level: ObservationLevel::Info,
            occurred_at: Utc::now(),
            payload,
        }
    }

    pub fn with_level(mut self, level: ObservationLevel) -> Self {
        self.level = level;
        self
    }

    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

/// Sink for structured observations.
pub trait Observer: Send + Sync {
    fn observe(&self, observation: &Observation);
}

impl<O> Observer for Arc<O>
where
    O: Observer + ?Sized,
{
    fn observe(&self, observation: &Observation) {
        (**self).observe(observation)
    }
}

/// Forwards observations to `tracing` as single structured events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, observation: &Observation) {
        match observation.level {
            ObservationLevel::Info => ::tracing::info!(
                event_type = observation.event_type,
                occurred_at = %observation.occurred_at.to_rfc3339(),
                payload = %observation.payload,
            ),
            ObservationLevel::Warn => ::tracing::warn!(
                event_type = observation.event_type,
                occurred_at = %observation.occurred_at.to_rfc3339(),
                payload = %observation.payload,
            ),
        }
    }
}

/// In-memory observer for tests/dev.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    inner: Mutex<Vec<Observation>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Observation> {
        match self.inner.lock() {
            Ok(v) => v.clone(),
            Err(_) => vec![],
        }
    }

    pub fn event_types(&self) -> Vec<&'static str> {
        self.all().iter().map(|o| o.event_type).collect()
    }
}

impl Observer for RecordingObserver {
    fn observe(&self, observation: &Observation) {
        if let Ok(mut v) = self.inner.lock() {
            v.push(observation.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Probe {
        color: &'static str,
        quantity: u32,
    }

    #[test]
    fn recording_observer_keeps_order_and_payload() {
        let observer = RecordingObserver::new();
        observer.observe(&Observation::new("a.first", &Probe { color: "red", quantity: 1 }));
        observer.observe(
            &Observation::new("a.second", &Probe { color: "blue", quantity: 2 })
                .with_level(ObservationLevel::Warn),
        );

        assert_eq!(observer.event_types(), vec!["a.first", "a.second"]);
        let all = observer.all();
        assert_eq!(all[0].payload["color"], "red");
        assert_eq!(all[1].level, ObservationLevel::Warn);
    }

    #[test]
    fn shared_observer_forwards_through_arc() {
        let observer = Arc::new(RecordingObserver::new());
        let shared: Arc<dyn Observer> = observer.clone();
        shared.observe(&Observation::new("a.shared", &Probe { color: "red", quantity: 3 }));
        assert_eq!(observer.event_types(), vec!["a.shared"]);
    }

    #[test]
    fn tracing_observer_does_not_panic_without_subscriber() {
        TracingObserver.observe(&Observation::new("a.noop", &Probe { color: "red", quantity: 0 }));
    }
}
