// Toxicity scorer trait — the swap-ready abstraction.
//
// One outbound call per submission attempt, no retry: a single failure is
// terminal for that submission and the gate fails closed.

use anyhow::Result;
use async_trait::async_trait;

/// Per-category summary scores for one piece of text (all 0.0 to 1.0).
/// Not every provider populates every field.
#[derive(Debug, Clone, Default)]
pub struct ToxicityScores {
    pub toxicity: f64,
    pub severe_toxicity: Option<f64>,
    pub profanity: Option<f64>,
    pub sexually_explicit: Option<f64>,
    pub threat: Option<f64>,
    pub insult: Option<f64>,
}

/// Trait for scoring text toxicity. Implementations must be async because
/// providers require HTTP API calls.
#[async_trait]
pub trait ToxicityScorer: Send + Sync {
    /// Score a single text across the harmful-content categories.
    async fn score_text(&self, text: &str) -> Result<ToxicityScores>;
}
