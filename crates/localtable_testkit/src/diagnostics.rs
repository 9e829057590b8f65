//! Diagnostics helpers for tests.

use localtable_core::{Diagnostics, Event};
use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;

/// A diagnostics sink that keeps every event it receives.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<Event>>,
}

impl RecordingDiagnostics {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    /// Returns recorded events other than table writes and drops.
    pub fn rejections(&self) -> Vec<Event> {
        self.events
            .lock()
            .iter()
            .filter(|e| !matches!(e, Event::TableWritten { .. } | Event::TableDropped { .. }))
            .cloned()
            .collect()
    }

    /// Forgets all recorded events.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&self, event: &Event) {
        self.events.lock().push(event.clone());
    }
}

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Filtering follows `RUST_LOG`. Safe to call from every test; only the
/// first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
