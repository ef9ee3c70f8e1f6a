//! Windowed `newsfeed.search` client and post normalization.
//!
//! [`NewsfeedClient::fetch_all`] walks a date range in fixed-size windows,
//! one request per window with a fixed pause in between, and returns the raw
//! items together with the error that stopped the walk, if any.
//! [`normalize_posts`] turns those raw items into deduplicated, time-ordered
//! [`vkpulse_core::Post`]s.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;
pub mod window;

pub use client::{FetchOutcome, NewsfeedClient, WindowPage};
pub use error::NewsfeedError;
pub use normalize::{coerce_count, normalize_posts, FieldIssue, NormalizedPosts};
pub use types::{ApiErrorDetail, Counter, RawPost};
pub use window::{plan_windows, FetchWindow};
