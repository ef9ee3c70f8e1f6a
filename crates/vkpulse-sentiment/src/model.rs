//! Client for an externally hosted text-classification model.
//!
//! Speaks the `POST /predict` shape of Hugging Face text-embeddings-inference:
//! the request carries one single-element list per text and the reply holds,
//! per text, every label with its score.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::types::{Sentiment, SentimentLabel};

/// Categorical strategy backed by a remote model.
#[derive(Debug, Clone)]
pub struct ModelClassifier {
    client: reqwest::Client,
    url: String,
    batch_size: usize,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: Vec<[&'a str; 1]>,
    truncate: bool,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f32,
}

impl ModelClassifier {
    /// Creates a classifier for the model served at `base_url`.
    ///
    /// A `batch_size` of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        batch_size: usize,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: format!("{}/predict", base_url.trim_end_matches('/')),
            batch_size: batch_size.max(1),
        })
    }

    /// Sends one batch and returns one label per text, in order.
    async fn predict(&self, batch: &[&str]) -> Result<Vec<SentimentLabel>, SentimentError> {
        let request = PredictRequest {
            inputs: batch.iter().map(|text| [*text]).collect(),
            truncate: true,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SentimentError::Model(format!("classifier request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::Model(format!(
                "classifier returned status {}",
                response.status()
            )));
        }

        let predictions: Vec<Vec<Prediction>> = response.json().await.map_err(|e| {
            SentimentError::Model(format!("classifier response parse error: {e}"))
        })?;

        if predictions.len() != batch.len() {
            return Err(SentimentError::Model(format!(
                "classifier returned {} predictions for {} inputs",
                predictions.len(),
                batch.len()
            )));
        }

        predictions
            .iter()
            .map(Vec::as_slice)
            .map(top_label)
            .collect()
    }
}

/// Picks the highest-scoring label of one prediction.
fn top_label(scores: &[Prediction]) -> Result<SentimentLabel, SentimentError> {
    let best = scores
        .iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| SentimentError::Model("classifier returned no labels".to_owned()))?;
    best.label.parse()
}

impl SentimentClassifier for ModelClassifier {
    fn name(&self) -> &'static str {
        "model"
    }

    /// Blank texts are answered with [`SentimentLabel::Neutral`] locally and
    /// never sent. The rest go out in batches of `batch_size`.
    async fn classify(&self, texts: &[&str]) -> Result<Vec<Sentiment>, SentimentError> {
        let mut results = vec![Sentiment::Label(SentimentLabel::Neutral); texts.len()];
        let pending: Vec<(usize, &str)> = texts
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(idx, text)| (idx, *text))
            .collect();

        for chunk in pending.chunks(self.batch_size) {
            let batch: Vec<&str> = chunk.iter().map(|(_, text)| *text).collect();
            let labels = self.predict(&batch).await?;
            tracing::debug!(batch = batch.len(), "classified batch");
            for ((idx, _), label) in chunk.iter().zip(labels) {
                results[*idx] = Sentiment::Label(label);
            }
        }

        Ok(results)
    }
}
