//! Sahifa core — an in-process mock backend for an Arabic content site.
//!
//! There is no server here: the whole "backend" is [`ContentBackend`], a
//! single service object that seeds demo data, simulates authentication and
//! answers path-style pseudo-endpoints through
//! [`ContentBackend::process_request`]. State lives in one versioned JSON
//! aggregate persisted best-effort through a swappable key/value store;
//! sessions and poll-vote markers live in their own stores with an
//! independent fallback chain each.

pub mod config;
pub mod core_backend;
pub mod core_router;
pub mod core_session;
pub mod core_store;
pub mod error;
pub mod logging;
pub mod model;
pub mod text;

pub use config::Config;
pub use core_backend::ContentBackend;
pub use core_router::Method;
pub use error::{BackendError, BackendResult};
pub use logging::{init_logging, LogLevel};
