//! Fallback-chain behaviour, tested independently of domain logic.

use serde_json::{json, Value};
use tempfile::tempdir;

use sahifa_core::core_store::{
    with_fallback, FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult,
};
use sahifa_core::{Config, ContentBackend, Method};

/// A store whose writes always fail, like storage in a locked-down
/// browser profile.
struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Storage("storage disabled".to_string()))
    }

    fn remove(&mut self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Storage("storage disabled".to_string()))
    }

    fn label(&self) -> &'static str {
        "disabled"
    }
}

#[test]
fn test_probe_prefers_working_file_store() {
    let dir = tempdir().unwrap();
    let mut store = with_fallback(
        Box::new(FileStore::new(dir.path().join("kv"))),
        Box::new(MemoryStore::new()),
    );
    assert_eq!(store.label(), "file");

    store.set("k", "v").unwrap();
    assert!(dir.path().join("kv").join("k").exists());
}

#[test]
fn test_probe_degrades_to_memory() {
    let store = with_fallback(Box::new(DisabledStore), Box::new(MemoryStore::new()));
    assert_eq!(store.label(), "memory");
}

#[test]
fn test_backend_works_with_every_store_disabled() {
    // all three stores swallow writes; the backend still runs a full
    // session in memory, it just persists nothing
    let mut backend = ContentBackend::with_stores(
        Box::new(DisabledStore),
        Box::new(DisabledStore),
        Box::new(DisabledStore),
    );

    let results = backend
        .process_request("/polls/results", Method::Get, Value::Null)
        .unwrap();
    assert_eq!(results["totalVotes"], 78);

    let subscribed = backend
        .process_request(
            "/newsletter/subscribe",
            Method::Post,
            json!({"email": "reader@sahifa.com"}),
        )
        .unwrap();
    assert!(subscribed["message"].as_str().unwrap().contains("تم الاشتراك"));

    // votes still count within the instance even though the marker
    // store drops its write
    let voted = backend
        .process_request(
            "/polls/vote",
            Method::Post,
            json!({"pollId": "homepage-theme", "theme": "dark"}),
        )
        .unwrap();
    assert_eq!(voted["totalVotes"], 79);
}

#[test]
fn test_stores_degrade_independently() {
    let dir = tempdir().unwrap();

    // block only the aggregate store by planting a file where its
    // directory should go
    std::fs::write(dir.path().join("store"), "blocker").unwrap();

    let mut config = Config::default();
    config.store.data_dir = dir.path().to_path_buf();
    let mut backend = ContentBackend::new(&config);

    backend
        .process_request(
            "/polls/vote",
            Method::Post,
            json!({"pollId": "homepage-theme", "theme": "sepia"}),
        )
        .unwrap();

    // the vote marker reached its own file store even though the
    // aggregate degraded to memory
    assert!(dir
        .path()
        .join("votes")
        .join("sahifa-poll-vote-homepage-theme")
        .exists());
    assert!(dir.path().join("store").is_file());
}
