//! The interface shared by every sentiment strategy.

use std::future::Future;

use crate::error::SentimentError;
use crate::types::Sentiment;

/// Assigns a [`Sentiment`] to each of a batch of texts.
///
/// Implementations must return exactly one result per input, in input order,
/// and must accept empty or whitespace-only texts (answering neutral).
pub trait SentimentClassifier {
    /// Short strategy name for logs, e.g. `lexicon`.
    fn name(&self) -> &'static str;

    /// Classifies `texts`.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError`] if the underlying model cannot be reached
    /// or answers with something unusable.
    fn classify(
        &self,
        texts: &[&str],
    ) -> impl Future<Output = Result<Vec<Sentiment>, SentimentError>> + Send;
}
