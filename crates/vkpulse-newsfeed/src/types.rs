//! Wire types for the VK `newsfeed.search` method.
//!
//! ## Observed shape
//!
//! ```text
//! {"response": {"items": [{"id": 1, "owner_id": -1, "date": 1696118400,
//!   "text": "...", "likes": {"count": 3}, "views": {"count": 120}, ...}],
//!   "count": 1, "total_count": 1}}
//! ```
//!
//! Counter objects (`comments`, `likes`, `reposts`, `views`) normally hold a
//! scalar `count`, but some responses carry a one-element list instead, and
//! `views` is absent on posts older than view tracking. Counters are therefore
//! kept as untyped JSON here and coerced in [`crate::normalize`].
//!
//! Failures come back with HTTP 200 and an `error` object:
//!
//! ```text
//! {"error": {"error_code": 5, "error_msg": "User authorization failed: ...",
//!   "request_params": [...]}}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vkpulse_core::Post;

/// One item of `response.items`, restricted to the fields the pipeline uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    pub id: i64,
    pub owner_id: i64,
    /// Unix timestamp, seconds.
    pub date: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub comments: Option<Counter>,
    #[serde(default)]
    pub likes: Option<Counter>,
    #[serde(default)]
    pub reposts: Option<Counter>,
    #[serde(default)]
    pub views: Option<Counter>,
    /// Passed through untouched.
    #[serde(default)]
    pub attachments: Option<Value>,
}

/// A `{"count": ...}` object. `count` is `Value::Null` when the key is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counter {
    #[serde(default)]
    pub count: Value,
}

impl Counter {
    #[must_use]
    pub fn scalar(count: u64) -> Self {
        Self {
            count: Value::from(count),
        }
    }
}

impl From<&Post> for RawPost {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            owner_id: post.owner_id,
            date: post.published_at.timestamp(),
            text: post.text.clone(),
            comments: post.comments.map(Counter::scalar),
            likes: post.likes.map(Counter::scalar),
            reposts: post.reposts.map(Counter::scalar),
            views: post.views.map(Counter::scalar),
            attachments: post.attachments.clone(),
        }
    }
}

/// The `error` object of a failed call.
///
/// `raw` holds the object exactly as received; `error_code` and `error_msg`
/// are lifted out of it for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiErrorDetail {
    pub error_code: Option<i64>,
    pub error_msg: String,
    pub raw: Value,
}

impl ApiErrorDetail {
    #[must_use]
    pub fn from_value(raw: Value) -> Self {
        let error_code = raw.get("error_code").and_then(Value::as_i64);
        let error_msg = raw
            .get("error_msg")
            .and_then(Value::as_str)
            .map_or_else(|| raw.to_string(), str::to_owned);
        Self {
            error_code,
            error_msg,
            raw,
        }
    }
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_code {
            Some(code) => write!(f, "[{code}] {}", self.error_msg),
            None => write!(f, "{}", self.error_msg),
        }
    }
}
