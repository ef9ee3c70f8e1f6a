use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SentimentError;

/// Polarity scores within this distance of zero read as neutral.
pub const NEUTRAL_BAND: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; accepts the full names and the `pos`/`neg`/`neu`
/// abbreviations used by several published models.
impl FromStr for SentimentLabel {
    type Err = SentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "pos" => Ok(SentimentLabel::Positive),
            "negative" | "neg" => Ok(SentimentLabel::Negative),
            "neutral" | "neu" => Ok(SentimentLabel::Neutral),
            _ => Err(SentimentError::UnknownLabel(s.to_owned())),
        }
    }
}

/// Output of one classification: a categorical label or a polarity score in
/// `[-1.0, 1.0]`, depending on the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Sentiment {
    Label(SentimentLabel),
    Polarity(f32),
}

impl Sentiment {
    /// Categorical view of the result. Polarity scores inside
    /// [`NEUTRAL_BAND`] map to [`SentimentLabel::Neutral`].
    #[must_use]
    pub fn label(&self) -> SentimentLabel {
        match *self {
            Sentiment::Label(label) => label,
            Sentiment::Polarity(score) if score > NEUTRAL_BAND => SentimentLabel::Positive,
            Sentiment::Polarity(score) if score < -NEUTRAL_BAND => SentimentLabel::Negative,
            Sentiment::Polarity(_) => SentimentLabel::Neutral,
        }
    }

    /// The polarity score, if this result came from a polarity strategy.
    #[must_use]
    pub fn polarity(&self) -> Option<f32> {
        match *self {
            Sentiment::Polarity(score) => Some(score),
            Sentiment::Label(_) => None,
        }
    }
}

/// Sentiment of one post, tied back to the post by position and key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    /// Position of the post in the classified post set.
    pub index: usize,
    pub owner_id: i64,
    pub post_id: i64,
    pub sentiment: Sentiment,
}
