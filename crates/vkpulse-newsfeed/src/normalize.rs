//! Normalization of raw `newsfeed.search` items into [`vkpulse_core::Post`]s.
//!
//! Steps, in order:
//! 1. parse `date` (epoch seconds) into a UTC timestamp;
//! 2. drop exact duplicates, comparing every field except `attachments`;
//!    the first occurrence wins;
//! 3. stable-sort by timestamp;
//! 4. coerce each counter to a scalar (`7` → 7, `[5]` → 5, `[]` → 0).
//!
//! Values that cannot be coerced become `None` on the post and are reported
//! as [`FieldIssue`]s. They never abort normalization of other fields or posts.

use std::collections::HashSet;

use chrono::DateTime;
use serde_json::Value;
use vkpulse_core::Post;

use crate::types::{Counter, RawPost};

/// A field that could not be interpreted on one post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub owner_id: i64,
    pub post_id: i64,
    /// Field name as exported, e.g. `likes.count`.
    pub field: &'static str,
    pub reason: String,
}

/// Output of [`normalize_posts`].
#[derive(Debug, Clone, Default)]
pub struct NormalizedPosts {
    /// Deduplicated posts, ascending by publication time.
    pub posts: Vec<Post>,
    pub issues: Vec<FieldIssue>,
    pub duplicates_removed: usize,
}

/// Cleans a raw result set. See the module docs for the steps.
#[must_use]
pub fn normalize_posts(raw: Vec<RawPost>) -> NormalizedPosts {
    let mut out = NormalizedPosts::default();
    let mut seen = HashSet::new();
    let mut staged = Vec::with_capacity(raw.len());

    for item in raw {
        let Some(published_at) = DateTime::from_timestamp(item.date, 0) else {
            out.issues.push(FieldIssue {
                owner_id: item.owner_id,
                post_id: item.id,
                field: "date",
                reason: format!("timestamp {} is out of range; post dropped", item.date),
            });
            continue;
        };

        if !seen.insert(dedup_key(&item)) {
            out.duplicates_removed += 1;
            continue;
        }
        staged.push((published_at, item));
    }

    // `sort_by_key` is stable: equal timestamps keep their fetch order.
    staged.sort_by_key(|(published_at, _)| *published_at);

    for (published_at, item) in staged {
        let mut count = |field: &'static str, counter: Option<&Counter>| {
            let result = match counter {
                Some(c) => coerce_count(&c.count),
                None => Err("field missing".to_owned()),
            };
            result
                .map_err(|reason| {
                    out.issues.push(FieldIssue {
                        owner_id: item.owner_id,
                        post_id: item.id,
                        field,
                        reason,
                    });
                })
                .ok()
        };

        let comments = count("comments.count", item.comments.as_ref());
        let likes = count("likes.count", item.likes.as_ref());
        let reposts = count("reposts.count", item.reposts.as_ref());
        let views = count("views.count", item.views.as_ref());

        out.posts.push(Post {
            id: item.id,
            owner_id: item.owner_id,
            published_at,
            text: item.text,
            comments,
            likes,
            reposts,
            views,
            attachments: item.attachments,
        });
    }

    for issue in &out.issues {
        tracing::warn!(
            owner_id = issue.owner_id,
            post_id = issue.post_id,
            field = issue.field,
            reason = %issue.reason,
            "post field could not be normalized"
        );
    }
    tracing::debug!(
        posts = out.posts.len(),
        duplicates_removed = out.duplicates_removed,
        issues = out.issues.len(),
        "normalized newsfeed posts"
    );

    out
}

/// Coerces one counter value to a scalar.
///
/// Accepts a non-negative integer, a one-element list holding one, or an
/// empty list (read as zero).
///
/// # Errors
///
/// Returns a human-readable reason for any other shape.
pub fn coerce_count(value: &Value) -> Result<u64, String> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| format!("expected a non-negative integer, got {n}")),
        Value::Array(items) => match items.as_slice() {
            [] => Ok(0),
            [single] => single
                .as_u64()
                .ok_or_else(|| format!("expected a non-negative integer in list, got {single}")),
            _ => Err(format!("expected at most one element, got {}", items.len())),
        },
        Value::Null => Err("count missing".to_owned()),
        other => Err(format!("unexpected count value {other}")),
    }
}

/// Identity of a raw item for deduplication: everything but `attachments`.
///
/// Counters are compared in their raw JSON form, so `5` and `[5]` are
/// different values here.
fn dedup_key(item: &RawPost) -> (i64, i64, i64, String, String) {
    let counters = [&item.comments, &item.likes, &item.reposts, &item.views]
        .map(|c| c.as_ref().map_or(Value::Null, |c| c.count.clone()));
    (
        item.id,
        item.owner_id,
        item.date,
        item.text.clone(),
        Value::from(counters.to_vec()).to_string(),
    )
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
