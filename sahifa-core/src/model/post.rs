use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{PostId, PostStatus};

/// A published article.
///
/// `author` is a display-name snapshot taken at creation, not a foreign
/// key; `body` holds pre-rendered paragraph markup; `excerpt` is derived
/// from the raw body at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub slug: String,
    pub title: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub category: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub hero_image: String,
    pub card_image: String,
    pub body: String,
    pub comments: u32,
    pub status: PostStatus,
    pub trending_score: u32,
    pub recommended_score: u32,
}

/// One reader rating for a post; stored append-only, never aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingEntry {
    pub rating: u8,
    pub at: DateTime<Utc>,
}
