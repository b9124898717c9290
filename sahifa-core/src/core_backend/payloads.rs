//! Typed request payloads.
//!
//! Each operation's input is an explicit struct deserialized at the
//! boundary; missing string fields default to empty so blank-field
//! validation stays in one place, in the operation itself.

use serde::Deserialize;

use crate::model::Role;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, alias = "passwordConfirm")]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterPayload {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotePayload {
    #[serde(default)]
    pub poll_id: String,
    /// The chosen option key. The field is named after the seeded
    /// homepage poll whose options are themes.
    #[serde(default, alias = "optionKey")]
    pub theme: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<TagsInput>,
    #[serde(default)]
    pub body: String,
}

/// Tags arrive either pre-split or as one delimiter-separated string
/// (comma or Arabic comma).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Text(String),
}

impl TagsInput {
    /// Normalize to a trimmed, empties-filtered list.
    pub fn into_tags(self) -> Vec<String> {
        let raw = match self {
            TagsInput::List(items) => items,
            TagsInput::Text(text) => text
                .split([',', '،'])
                .map(str::to_string)
                .collect(),
        };
        raw.into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollPayload {
    #[serde(default)]
    pub question: String,
    /// Newline-delimited option labels.
    #[serde(default)]
    pub options: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default, alias = "name")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingPayload {
    #[serde(default)]
    pub rating: Option<u8>,
}
