//! Typed operation results.
//!
//! These are what the router serializes back to callers; the
//! presentation layer renders them as-is and never sees the aggregate.

use serde::{Deserialize, Serialize};

use crate::model::{Post, PublicUser};

/// Result of login and register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Bare confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

/// Result of article creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub message: String,
    pub article: Post,
}

/// Result of admin user creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub message: String,
    pub user: PublicUser,
}

/// One option row in the poll-results projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionView {
    pub value: String,
    pub label: String,
    pub votes: u64,
    /// Rounded share of the total; 0 when the poll has no votes at all.
    pub percent: u32,
}

/// The poll-results projection returned by voting and results calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResultsView {
    pub poll_id: String,
    pub title: String,
    pub options: Vec<PollOptionView>,
    pub total_votes: u64,
    pub has_voted: bool,
    pub selected_option: Option<String>,
}
