//! Best-effort persistence of the domain aggregate.

use tracing::{debug, warn};

use super::kv::KeyValueStore;
use crate::model::Aggregate;

/// Fixed key the aggregate lives under in its store.
pub const STORAGE_KEY: &str = "sahifa-data";

/// Wraps a [`KeyValueStore`] with the aggregate's JSON encoding and the
/// swallow-on-failure save policy: storage failures never become domain
/// errors, they are logged and dropped.
pub struct AggregateStore {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl AggregateStore {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Load the persisted aggregate. Absent, unreadable, or unparsable
    /// state all resolve to `None` — the caller re-seeds.
    pub fn load(&self) -> Option<Aggregate> {
        let raw = self.store.get(&self.key)?;
        match serde_json::from_str(&raw) {
            Ok(aggregate) => Some(aggregate),
            Err(err) => {
                warn!("discarding unparsable persisted aggregate: {}", err);
                None
            }
        }
    }

    /// Write the aggregate back, swallowing failures.
    pub fn save(&mut self, aggregate: &Aggregate) {
        let raw = match serde_json::to_string(aggregate) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("aggregate serialization failed, skipping save: {}", err);
                return;
            }
        };
        match self.store.set(&self.key, &raw) {
            Ok(()) => debug!(bytes = raw.len(), "aggregate persisted"),
            Err(err) => warn!("aggregate save failed, continuing in memory: {}", err),
        }
    }
}
