//! The store trait and the construction-time fallback probe.

use tracing::warn;
use uuid::Uuid;

use super::errors::StoreResult;

/// String key/value persistence.
///
/// Mirrors the capabilities the backend actually needs: read a key,
/// overwrite a key, delete a key. Reads are infallible (an unreadable
/// value is treated as absent); writes surface their failure so the
/// probe and the best-effort save sites can react.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;

    /// Short name used in degradation logs.
    fn label(&self) -> &'static str;
}

/// Probe `preferred` by writing and removing a throwaway key; return it
/// when usable, otherwise fall back.
///
/// Applied independently per concern (aggregate, session, vote markers),
/// so each degrades on its own.
pub fn with_fallback(
    mut preferred: Box<dyn KeyValueStore>,
    fallback: Box<dyn KeyValueStore>,
) -> Box<dyn KeyValueStore> {
    let probe_key = format!("sahifa-storage-probe-{}", Uuid::new_v4());
    let usable =
        preferred.set(&probe_key, "1").is_ok() && preferred.remove(&probe_key).is_ok();
    if usable {
        preferred
    } else {
        warn!(
            preferred = preferred.label(),
            fallback = fallback.label(),
            "preferred store rejected the probe write, falling back"
        );
        fallback
    }
}
