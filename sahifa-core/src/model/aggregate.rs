use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::poll::Poll;
use super::post::{Post, RatingEntry};
use super::types::PollId;
use super::user::User;

/// Expected schema tag. A persisted aggregate carrying any other tag is
/// discarded and re-seeded; there is no migration path.
pub const DATA_VERSION: &str = "2026-08-07";

/// The single versioned bundle of all durable domain state.
///
/// Loaded once at startup, rewritten after every mutation. Exclusively
/// owned by the backend; collaborators only ever see operation results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub version: String,
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub polls: BTreeMap<PollId, Poll>,
    pub newsletter_subscribers: Vec<String>,
    pub ratings: BTreeMap<String, Vec<RatingEntry>>,
}

impl Aggregate {
    /// Case-insensitive email lookup.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        let needle = email.to_lowercase();
        self.users
            .iter()
            .find(|user| user.email.to_lowercase() == needle)
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.user_by_email(email).is_some()
    }

    pub fn post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    pub fn slug_taken(&self, slug: &str) -> bool {
        self.post_by_slug(slug).is_some()
    }
}
