//! Tracing, logging and structured observations (shared setup).

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Injected observation sink used by services.
pub mod observer;

pub use observer::{Observation, ObservationLevel, Observer, RecordingObserver, TracingObserver};
