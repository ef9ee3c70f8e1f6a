//! Classification of a post set and label-based filtering.

use vkpulse_core::Post;

use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::types::{SentimentLabel, SentimentResult};

/// Classify every post's text with `classifier`.
///
/// Texts are sent in post order and results are tied back to posts by
/// position, so `results[i]` always describes `posts[i]`.
///
/// # Errors
///
/// Returns [`SentimentError::LengthMismatch`] if the classifier answers with
/// a different number of results than posts, or whatever error the
/// classifier itself raised.
pub async fn classify_posts<C: SentimentClassifier>(
    classifier: &C,
    posts: &[Post],
) -> Result<Vec<SentimentResult>, SentimentError> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<&str> = posts.iter().map(|p| p.text.as_str()).collect();
    let sentiments = classifier.classify(&texts).await?;

    if sentiments.len() != posts.len() {
        return Err(SentimentError::LengthMismatch {
            expected: posts.len(),
            got: sentiments.len(),
        });
    }

    let results: Vec<SentimentResult> = posts
        .iter()
        .zip(sentiments)
        .enumerate()
        .map(|(index, (post, sentiment))| SentimentResult {
            index,
            owner_id: post.owner_id,
            post_id: post.id,
            sentiment,
        })
        .collect();

    tracing::info!(
        classifier = classifier.name(),
        posts = results.len(),
        "classified posts"
    );
    Ok(results)
}

/// Posts whose sentiment reads as `label`, in their original order.
///
/// `results` must come from [`classify_posts`] over the same `posts`.
#[must_use]
pub fn filter_by_label(
    posts: &[Post],
    results: &[SentimentResult],
    label: SentimentLabel,
) -> Vec<Post> {
    posts
        .iter()
        .zip(results)
        .filter(|(_, result)| result.sentiment.label() == label)
        .map(|(post, _)| post.clone())
        .collect()
}

/// Number of results per label, in [`SentimentLabel::ALL`] order.
#[must_use]
pub fn label_distribution(results: &[SentimentResult]) -> Vec<(SentimentLabel, usize)> {
    SentimentLabel::ALL
        .iter()
        .map(|&label| {
            let count = results
                .iter()
                .filter(|r| r.sentiment.label() == label)
                .count();
            (label, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::types::Sentiment;

    /// Labels texts by their first word; optionally drops the last result.
    struct MockClassifier {
        drop_last: bool,
        calls: AtomicUsize,
    }

    impl MockClassifier {
        fn new() -> Self {
            Self {
                drop_last: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SentimentClassifier for MockClassifier {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn classify(&self, texts: &[&str]) -> Result<Vec<Sentiment>, SentimentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut out: Vec<Sentiment> = texts
                .iter()
                .map(|t| match t.split_whitespace().next() {
                    Some("good") => Sentiment::Label(SentimentLabel::Positive),
                    Some("bad") => Sentiment::Polarity(-0.8),
                    _ => Sentiment::Polarity(0.0),
                })
                .collect();
            if self.drop_last {
                out.pop();
            }
            Ok(out)
        }
    }

    fn post(id: i64, text: &str) -> Post {
        Post {
            id,
            owner_id: -1,
            published_at: Utc.with_ymd_and_hms(2023, 10, 1, 12, 0, 0).unwrap(),
            text: text.to_owned(),
            comments: Some(0),
            likes: Some(0),
            reposts: Some(0),
            views: Some(10),
            attachments: None,
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            post(1, "good launch"),
            post(2, "bad weather"),
            post(3, ""),
            post(4, "good crew"),
        ]
    }

    #[tokio::test]
    async fn results_are_aligned_with_posts() {
        let posts = sample();
        let results = classify_posts(&MockClassifier::new(), &posts).await.unwrap();

        assert_eq!(results.len(), 4);
        for (i, (post, result)) in posts.iter().zip(&results).enumerate() {
            assert_eq!(result.index, i);
            assert_eq!(result.post_id, post.id);
            assert_eq!(result.owner_id, post.owner_id);
        }
        assert_eq!(results[0].sentiment.label(), SentimentLabel::Positive);
        assert_eq!(results[1].sentiment.label(), SentimentLabel::Negative);
        assert_eq!(results[2].sentiment.label(), SentimentLabel::Neutral);
    }

    #[tokio::test]
    async fn length_mismatch_is_an_error() {
        let classifier = MockClassifier {
            drop_last: true,
            ..MockClassifier::new()
        };
        let err = classify_posts(&classifier, &sample()).await.unwrap_err();
        assert!(matches!(
            err,
            SentimentError::LengthMismatch {
                expected: 4,
                got: 3
            }
        ));
    }

    #[tokio::test]
    async fn empty_post_set_skips_the_classifier() {
        let classifier = MockClassifier::new();
        let results = classify_posts(&classifier, &[]).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn filter_keeps_matching_posts_in_order() {
        let posts = sample();
        let results = classify_posts(&MockClassifier::new(), &posts).await.unwrap();

        let positive = filter_by_label(&posts, &results, SentimentLabel::Positive);
        let ids: Vec<i64> = positive.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 4]);

        let neutral = filter_by_label(&posts, &results, SentimentLabel::Neutral);
        assert_eq!(neutral.len(), 1);
        assert_eq!(neutral[0].id, 3);
    }

    #[tokio::test]
    async fn distribution_counts_every_label() {
        let posts = sample();
        let results = classify_posts(&MockClassifier::new(), &posts).await.unwrap();
        assert_eq!(
            label_distribution(&results),
            vec![
                (SentimentLabel::Positive, 2),
                (SentimentLabel::Negative, 1),
                (SentimentLabel::Neutral, 1),
            ]
        );
    }

    #[test]
    fn distribution_of_nothing_is_all_zero() {
        assert!(label_distribution(&[])
            .iter()
            .all(|(_, count)| *count == 0));
    }
}
