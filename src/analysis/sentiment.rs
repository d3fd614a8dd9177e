//! Lexicon-based sentiment scoring for viewer comments.
//!
//! Each text is tokenized and scored against a small polarity
//! lexicon, with negators flipping and intensifiers boosting the
//! following sentiment word. Scores land in [-1, 1]; a text with no
//! lexicon hits scores 0.

use serde::Serialize;

use crate::error::{BrandLensError, Result};

/// Words that carry polarity, with weights in [-1, 1].
const LEXICON: &[(&str, f64)] = &[
    // positive
    ("amazing", 0.9),
    ("awesome", 0.9),
    ("excellent", 0.9),
    ("fantastic", 0.9),
    ("incredible", 0.9),
    ("perfect", 0.9),
    ("love", 0.8),
    ("loved", 0.8),
    ("brilliant", 0.8),
    ("wonderful", 0.8),
    ("best", 0.8),
    ("great", 0.7),
    ("beautiful", 0.7),
    ("impressive", 0.7),
    ("favorite", 0.7),
    ("masterpiece", 0.9),
    ("inspiring", 0.7),
    ("hilarious", 0.7),
    ("funny", 0.6),
    ("good", 0.5),
    ("nice", 0.5),
    ("enjoyed", 0.6),
    ("enjoy", 0.5),
    ("helpful", 0.6),
    ("useful", 0.5),
    ("informative", 0.6),
    ("clear", 0.4),
    ("quality", 0.4),
    ("recommend", 0.6),
    ("thanks", 0.5),
    ("thank", 0.5),
    ("underrated", 0.5),
    ("fire", 0.6),
    ("banger", 0.7),
    ("legend", 0.6),
    ("win", 0.4),
    ("fresh", 0.4),
    ("solid", 0.4),
    ("crisp", 0.4),
    ("smooth", 0.4),
    // negative
    ("terrible", -0.9),
    ("horrible", -0.9),
    ("awful", -0.9),
    ("worst", -0.9),
    ("disgusting", -0.9),
    ("garbage", -0.8),
    ("trash", -0.8),
    ("hate", -0.8),
    ("hated", -0.8),
    ("pathetic", -0.8),
    ("unwatchable", -0.8),
    ("scam", -0.8),
    ("clickbait", -0.7),
    ("misleading", -0.7),
    ("dishonest", -0.7),
    ("cringe", -0.6),
    ("boring", -0.6),
    ("annoying", -0.6),
    ("disappointing", -0.7),
    ("disappointed", -0.7),
    ("bad", -0.5),
    ("poor", -0.5),
    ("weak", -0.4),
    ("lazy", -0.5),
    ("fake", -0.6),
    ("dull", -0.5),
    ("slow", -0.3),
    ("confusing", -0.4),
    ("overrated", -0.5),
    ("waste", -0.6),
    ("wasted", -0.6),
    ("broken", -0.5),
    ("wrong", -0.4),
    ("noisy", -0.3),
    ("repetitive", -0.4),
    ("stale", -0.4),
    ("mid", -0.3),
    ("meh", -0.3),
    ("skip", -0.4),
    ("unsubscribed", -0.7),
];

/// Tokens that invert the polarity of the next sentiment word.
const NEGATORS: &[&str] = &["not", "no", "never", "isnt", "dont", "didnt", "wasnt", "wont", "cant"];

/// Tokens that amplify the polarity of the next sentiment word.
const INTENSIFIERS: &[&str] = &["very", "really", "so", "extremely", "absolutely", "super", "totally"];

const INTENSIFIER_BOOST: f64 = 1.3;
const NEGATION_FACTOR: f64 = -0.75;

/// Sentiment over a batch of comments.
#[derive(Debug, Clone, Serialize)]
pub struct SentimentSummary {
    /// Mean per-comment polarity in [-1, 1].
    pub score: f64,
    /// Overall label derived from the mean score.
    pub label: String,
    pub comments_scored: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

/// Polarity of a single text in [-1, 1].
pub fn polarity(text: &str) -> f64 {
    let tokens: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase().replace('\'', ""))
        .collect();

    let mut total = 0.0;
    let mut hits = 0usize;
    let mut negated = false;
    let mut boost = 1.0;

    for token in &tokens {
        if NEGATORS.contains(&token.as_str()) {
            negated = true;
            continue;
        }
        if INTENSIFIERS.contains(&token.as_str()) {
            boost = INTENSIFIER_BOOST;
            continue;
        }
        if let Some((_, weight)) = LEXICON.iter().find(|(w, _)| w == token) {
            let mut score = weight * boost;
            if negated {
                score *= NEGATION_FACTOR;
            }
            total += score;
            hits += 1;
        }
        negated = false;
        boost = 1.0;
    }

    if hits == 0 {
        return 0.0;
    }
    (total / hits as f64).clamp(-1.0, 1.0)
}

/// Mean polarity over a batch of texts. Rejects an empty batch.
pub fn mean_polarity(texts: &[String]) -> Result<f64> {
    if texts.is_empty() {
        return Err(BrandLensError::InvalidInput(
            "no comments provided for sentiment scoring".to_string(),
        ));
    }
    let sum: f64 = texts.iter().map(|t| polarity(t)).sum();
    Ok(sum / texts.len() as f64)
}

/// Label for a polarity score.
pub fn label(score: f64) -> &'static str {
    if score > 0.05 {
        "positive"
    } else if score < -0.05 {
        "negative"
    } else {
        "neutral"
    }
}

/// Scores a batch of comments and tallies the per-comment labels.
pub fn summarize(texts: &[String]) -> Result<SentimentSummary> {
    let score = mean_polarity(texts)?;

    let mut positive = 0;
    let mut negative = 0;
    let mut neutral = 0;
    for text in texts {
        match label(polarity(text)) {
            "positive" => positive += 1,
            "negative" => negative += 1,
            _ => neutral += 1,
        }
    }

    Ok(SentimentSummary {
        score,
        label: label(score).to_string(),
        comments_scored: texts.len(),
        positive,
        negative,
        neutral,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text_scores_positive() {
        assert!(polarity("This video was amazing, great editing!") > 0.0);
    }

    #[test]
    fn test_negative_text_scores_negative() {
        assert!(polarity("Terrible clickbait, such a waste of time") < 0.0);
    }

    #[test]
    fn test_text_without_lexicon_hits_is_neutral() {
        assert_eq!(polarity("The mitochondria is the powerhouse of the cell"), 0.0);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let plain = polarity("good video");
        let negated = polarity("not good video");
        assert!(plain > 0.0);
        assert!(negated < 0.0);
    }

    #[test]
    fn test_intensifier_boosts_polarity() {
        assert!(polarity("really good") > polarity("good"));
    }

    #[test]
    fn test_polarity_stays_in_range() {
        let gushing = "absolutely amazing perfect incredible best masterpiece";
        let score = polarity(gushing);
        assert!(score <= 1.0);
        assert!(score >= -1.0);
    }

    #[test]
    fn test_empty_batch_rejected() {
        let result = mean_polarity(&[]);
        assert!(matches!(result, Err(BrandLensError::InvalidInput(_))));
    }

    #[test]
    fn test_mean_polarity_averages_texts() {
        let texts = vec!["amazing".to_string(), "terrible".to_string()];
        let score = mean_polarity(&texts).unwrap();
        assert!(score.abs() < 0.11);
    }

    #[test]
    fn test_summary_counts_labels() {
        let texts = vec![
            "this was amazing".to_string(),
            "absolute garbage".to_string(),
            "a video about trains".to_string(),
        ];
        let summary = summarize(&texts).unwrap();
        assert_eq!(summary.comments_scored, 3);
        assert_eq!(summary.positive, 1);
        assert_eq!(summary.negative, 1);
        assert_eq!(summary.neutral, 1);
    }

    #[test]
    fn test_single_comment_summary_label() {
        let texts = vec!["I loved this, very helpful".to_string()];
        let summary = summarize(&texts).unwrap();
        assert_eq!(summary.label, "positive");
    }
}
