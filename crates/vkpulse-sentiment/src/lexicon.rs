//! Rule-based polarity scorer for Russian and English post text.

use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::types::Sentiment;

/// English word weights, matched against whole lowercase words.
///
/// Values in `(0.0, 1.0]` are positive, in `[-1.0, 0.0)` negative.
pub(crate) const WORDS: &[(&str, f32)] = &[
    // Positive
    ("good", 0.3),
    ("great", 0.4),
    ("excellent", 0.5),
    ("amazing", 0.5),
    ("wonderful", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("best", 0.5),
    ("happy", 0.4),
    ("proud", 0.4),
    ("thanks", 0.3),
    ("victory", 0.5),
    ("congratulations", 0.4),
    // Negative
    ("bad", -0.4),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("worst", -0.6),
    ("hate", -0.6),
    ("sad", -0.3),
    ("failed", -0.4),
    ("failure", -0.4),
    ("disaster", -0.6),
    ("tragedy", -0.6),
    ("scandal", -0.4),
    ("problem", -0.3),
    ("dangerous", -0.5),
];

/// Russian stem weights, matched as word prefixes so inflected forms hit
/// (`хорош` covers `хороший`, `хорошо`, `хорошая`).
pub(crate) const STEMS: &[(&str, f32)] = &[
    // Positive
    ("хорош", 0.3),
    ("отличн", 0.5),
    ("прекрасн", 0.5),
    ("замечательн", 0.5),
    ("великолепн", 0.5),
    ("восхит", 0.5),
    ("любл", 0.5),
    ("любим", 0.4),
    ("нрав", 0.3),
    ("радост", 0.4),
    ("раду", 0.4),
    ("счаст", 0.5),
    ("спасибо", 0.3),
    ("благодар", 0.3),
    ("горд", 0.4),
    ("побед", 0.4),
    ("лучш", 0.4),
    ("успех", 0.4),
    ("успешн", 0.4),
    ("поздрав", 0.3),
    ("интересн", 0.3),
    ("красив", 0.3),
    // Negative
    ("плох", -0.4),
    ("ужас", -0.6),
    ("отвратит", -0.6),
    ("ненави", -0.6),
    ("груст", -0.3),
    ("печал", -0.3),
    ("жаль", -0.3),
    ("трагед", -0.6),
    ("катастроф", -0.6),
    ("провал", -0.5),
    ("позор", -0.6),
    ("скандал", -0.4),
    ("проблем", -0.3),
    ("беда", -0.4),
    ("погиб", -0.6),
    ("авари", -0.5),
    ("худш", -0.5),
    ("разочаров", -0.5),
    ("обман", -0.5),
    ("страшн", -0.4),
    ("угроз", -0.4),
];

/// Words that invert the weight of the word right after them.
const NEGATORS: &[&str] = &["не", "нет", "ни", "not", "no", "never"];

/// Weight multiplier applied to a negated word.
const NEGATION_FACTOR: f32 = -0.5;

/// Score a text string using the bundled lexicon.
///
/// Splits text into lowercase words, sums matching weights (flipping and
/// halving a weight directly after a negator), and clamps the result to
/// `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn polarity_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    let mut negated = false;

    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase()
            .replace('ё', "е");
        if w.is_empty() {
            continue;
        }
        if NEGATORS.contains(&w.as_str()) {
            negated = true;
            continue;
        }
        if let Some(weight) = word_weight(&w) {
            score += if negated {
                weight * NEGATION_FACTOR
            } else {
                weight
            };
        }
        negated = false;
    }

    score.clamp(-1.0, 1.0)
}

fn word_weight(word: &str) -> Option<f32> {
    WORDS
        .iter()
        .find(|(lex, _)| *lex == word)
        .or_else(|| STEMS.iter().find(|(stem, _)| word.starts_with(stem)))
        .map(|&(_, weight)| weight)
}

/// Polarity strategy backed by [`polarity_score`]. Runs in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconClassifier;

impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    async fn classify(&self, texts: &[&str]) -> Result<Vec<Sentiment>, SentimentError> {
        Ok(texts
            .iter()
            .map(|text| Sentiment::Polarity(polarity_score(text)))
            .collect())
    }
}
