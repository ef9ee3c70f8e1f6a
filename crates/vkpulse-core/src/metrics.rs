//! Engagement metrics over a normalized post set.
//!
//! The engagement ratio ("ER View") of a post is
//! `(likes + comments + reposts) / views * 100`. It is undefined when the post
//! has no views or a counter is unknown; undefined ratios are represented as
//! `None` and are left out of daily sums. Each [`DailyAggregate`] records how
//! many of its posts were left out so charts can flag those days.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::posts::Post;

/// Per-day roll-up of a post set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Number of posts published that day.
    pub publications: usize,
    /// Sum of the defined engagement ratios of that day's posts.
    pub engagement_sum: f64,
    /// Posts whose engagement ratio was undefined and therefore not summed.
    pub undefined_ratios: usize,
}

/// Raw counters of one post, positioned at its publication time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPoint {
    pub at: DateTime<Utc>,
    pub likes: Option<u64>,
    pub reposts: Option<u64>,
    pub views: Option<u64>,
    pub comments: Option<u64>,
}

/// Engagement ratio of a single post, in percent.
///
/// Returns `None` when `views` is zero or when any of the four counters is
/// unknown.
#[must_use]
pub fn engagement_ratio(post: &Post) -> Option<f64> {
    let views = post.views?;
    if views == 0 {
        return None;
    }
    let interactions = post
        .likes?
        .checked_add(post.comments?)?
        .checked_add(post.reposts?)?;

    #[allow(clippy::cast_precision_loss)]
    let ratio = interactions as f64 / views as f64 * 100.0;
    Some(ratio)
}

/// Engagement ratio for every post, positionally aligned with `posts`.
#[must_use]
pub fn engagement_ratios(posts: &[Post]) -> Vec<Option<f64>> {
    posts.iter().map(engagement_ratio).collect()
}

/// Groups posts by UTC publication date, ascending.
#[must_use]
pub fn daily_aggregates(posts: &[Post]) -> Vec<DailyAggregate> {
    let mut by_date: BTreeMap<NaiveDate, DailyAggregate> = BTreeMap::new();

    for post in posts {
        let date = post.published_on();
        let day = by_date.entry(date).or_insert_with(|| DailyAggregate {
            date,
            publications: 0,
            engagement_sum: 0.0,
            undefined_ratios: 0,
        });
        day.publications += 1;
        match engagement_ratio(post) {
            Some(ratio) => day.engagement_sum += ratio,
            None => day.undefined_ratios += 1,
        }
    }

    by_date.into_values().collect()
}

/// `(date, publication count)` series for charting.
#[must_use]
pub fn publication_series(daily: &[DailyAggregate]) -> Vec<(NaiveDate, usize)> {
    daily.iter().map(|d| (d.date, d.publications)).collect()
}

/// `(date, summed engagement ratio)` series, aligned with [`publication_series`].
#[must_use]
pub fn engagement_series(daily: &[DailyAggregate]) -> Vec<(NaiveDate, f64)> {
    daily.iter().map(|d| (d.date, d.engagement_sum)).collect()
}

/// Likes, reposts, views and comments of every post over time.
#[must_use]
pub fn metric_series(posts: &[Post]) -> Vec<MetricPoint> {
    posts
        .iter()
        .map(|p| MetricPoint {
            at: p.published_at,
            likes: p.likes,
            reposts: p.reposts,
            views: p.views,
            comments: p.comments,
        })
        .collect()
}
