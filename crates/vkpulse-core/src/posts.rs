use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A newsfeed post after normalization: timestamp parsed, counters coerced to
/// scalars, duplicates removed.
///
/// A counter is `None` when the upstream value could not be interpreted as a
/// count (missing, wrong type, multi-element list). Such posts keep flowing
/// through the pipeline; only metrics that need the counter are affected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post ID, unique per owner.
    pub id: i64,
    /// Wall owner: positive for users, negative for communities.
    pub owner_id: i64,
    pub published_at: DateTime<Utc>,
    /// Post body; may be empty for attachment-only posts.
    pub text: String,
    pub comments: Option<u64>,
    pub likes: Option<u64>,
    pub reposts: Option<u64>,
    pub views: Option<u64>,
    /// Attachments exactly as returned by the API. Never inspected.
    pub attachments: Option<serde_json::Value>,
}

impl Post {
    /// Calendar date (UTC) the post was published on.
    #[must_use]
    pub fn published_on(&self) -> NaiveDate {
        self.published_at.date_naive()
    }
}
