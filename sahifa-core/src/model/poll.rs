use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::PollId;
use crate::text::slugify;

/// One poll option, keyed in [`Poll::options`] by its `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOption {
    pub value: String,
    pub label: String,
    pub votes: u64,
}

/// A poll. Options are stored as a map (unordered by contract); the
/// ordered map keeps iteration stable for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: PollId,
    pub title: String,
    pub options: BTreeMap<String, PollOption>,
}

impl Poll {
    /// Build a poll from option labels, slugifying each label into its
    /// key with an `option-{index}` fallback when the slug comes out
    /// empty. Vote counts start at zero. Duplicate keys collapse,
    /// last label wins.
    pub fn from_labels<I, S>(id: PollId, title: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = BTreeMap::new();
        for (index, label) in labels.into_iter().enumerate() {
            let label = label.into();
            let mut value = slugify(&label);
            if value.is_empty() {
                value = format!("option-{}", index + 1);
            }
            options.insert(
                value.clone(),
                PollOption {
                    value,
                    label,
                    votes: 0,
                },
            );
        }
        Poll {
            id,
            title: title.into(),
            options,
        }
    }

    /// Sum of all option vote counts.
    pub fn total_votes(&self) -> u64 {
        self.options.values().map(|option| option.votes).sum()
    }
}
