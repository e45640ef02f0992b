//! Best-effort event log.
//!
//! Events are appended to a capped list kept in the store under
//! [`keys::TELEMETRY`]; once the cap is reached the oldest entries are
//! evicted. Tracking never fails from the caller's point of view: storage
//! problems are logged and dropped.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::store::{Store, keys};

/// Number of events kept when no capacity is configured.
pub const DEFAULT_TELEMETRY_CAPACITY: usize = 500;

/// Log target used when echoing events.
const LOG_TARGET: &str = "mindra::telemetry";

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Event name, e.g. `open_course`.
    pub name: String,
    /// Event-specific data.
    pub payload: Value,
    /// Milliseconds since the Unix epoch.
    pub ts: i64,
    /// Email of the signed-in user, if any.
    pub user: Option<String>,
}

impl TelemetryEvent {
    /// Create an event stamped with the current time.
    pub fn new(name: impl Into<String>, payload: Value, user: Option<&str>) -> Self {
        Self {
            name: name.into(),
            payload,
            ts: Utc::now().timestamp_millis(),
            user: user.map(str::to_string),
        }
    }
}

/// Appends events to the capped log in the store.
#[derive(Debug, Clone)]
pub struct TelemetrySink {
    store: Store,
    capacity: usize,
}

impl TelemetrySink {
    /// Create a sink keeping at most `capacity` events (minimum one).
    pub fn new(store: Store, capacity: usize) -> Self {
        Self {
            store,
            capacity: capacity.max(1),
        }
    }

    /// Maximum number of events kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record an event. Failures are logged and swallowed.
    pub fn track(&self, name: &str, payload: Value, user: Option<&str>) {
        let event = TelemetryEvent::new(name, payload, user);
        log::info!(target: LOG_TARGET, "{} {} user={:?}", event.name, event.payload, event.user);

        if let Err(e) = self.append(event) {
            log::debug!(target: LOG_TARGET, "Dropped telemetry event: {e}");
        }
    }

    /// The events currently kept, oldest first.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.store.load_or_default(keys::TELEMETRY)
    }

    fn append(&self, event: TelemetryEvent) -> Result<()> {
        // A corrupt log loads as empty, so it is replaced by a fresh one.
        let mut events = self.events();
        events.push(event);
        if events.len() > self.capacity {
            let excess = events.len() - self.capacity;
            events.drain(..excess);
        }
        self.store.set(keys::TELEMETRY, &events)
    }
}
