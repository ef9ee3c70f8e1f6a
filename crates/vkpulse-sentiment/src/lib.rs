//! Sentiment classification of newsfeed posts.
//!
//! Two interchangeable strategies implement [`SentimentClassifier`]:
//! [`LexiconClassifier`] scores polarity with a bundled Russian/English
//! lexicon, and [`ModelClassifier`] asks an externally hosted
//! text-classification model for a categorical label. [`classify_posts`]
//! runs either one over a post set and keeps results aligned by position.

pub mod classifier;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod pipeline;
pub mod types;

pub use classifier::SentimentClassifier;
pub use error::SentimentError;
pub use lexicon::{polarity_score, LexiconClassifier};
pub use model::ModelClassifier;
pub use pipeline::{classify_posts, filter_by_label, label_distribution};
pub use types::{Sentiment, SentimentLabel, SentimentResult};
