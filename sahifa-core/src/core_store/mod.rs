//! Key/value persistence with a graceful fallback chain.
//!
//! Every durable concern (the aggregate, the active session, poll-vote
//! markers) goes through the [`KeyValueStore`] trait. The preferred
//! medium is probed once at construction ([`with_fallback`]); if it
//! rejects writes the secondary store takes over, degrading ultimately
//! to the in-memory store. Save failures are swallowed at the
//! [`AggregateStore`] boundary — persistence is best-effort by design.

mod aggregate_store;
mod errors;
mod file;
mod kv;
mod memory;

pub use aggregate_store::{AggregateStore, STORAGE_KEY};
pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use kv::{with_fallback, KeyValueStore};
pub use memory::MemoryStore;
