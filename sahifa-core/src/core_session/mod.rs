//! Ephemeral "current user" tracking.
//!
//! The session record lives under its own key in a fallback-probed
//! store, separate from the durable aggregate. Exactly zero or one
//! session exists per context; starting a session overwrites any
//! previous one and ending a nonexistent session is not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core_store::KeyValueStore;
use crate::model::UserId;

/// Fixed key the active session lives under.
pub const SESSION_KEY: &str = "sahifa-active-session";

/// The persisted session record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user_id: UserId,
    pub logged_in_at: DateTime<Utc>,
}

/// Tracks the logged-in user for this context.
///
/// Only the record is managed here; resolving it to an actual account
/// is the backend's job, since the backend owns the aggregate.
pub struct SessionManager {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl SessionManager {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: SESSION_KEY.to_string(),
        }
    }

    /// The active session record, if any. Unreadable records count as
    /// no session.
    pub fn current(&self) -> Option<SessionRecord> {
        let raw = self.store.get(&self.key)?;
        serde_json::from_str(&raw).ok()
    }

    /// Start a session for `user_id`, overwriting any existing one.
    /// Best-effort like every store write.
    pub fn start(&mut self, user_id: &UserId) {
        let record = SessionRecord {
            user_id: user_id.clone(),
            logged_in_at: Utc::now(),
        };
        match serde_json::to_string(&record) {
            Ok(raw) => {
                if let Err(err) = self.store.set(&self.key, &raw) {
                    warn!("session write failed: {}", err);
                }
            }
            Err(err) => warn!("session serialization failed: {}", err),
        }
    }

    /// End the active session. Idempotent.
    pub fn end(&mut self) {
        if let Err(err) = self.store.remove(&self.key) {
            warn!("session removal failed: {}", err);
        }
    }
}
