// Threshold gate — turns per-category scores into a pass/fail verdict.
//
// Each category has its own threshold; any score strictly above its
// threshold flags the submission with that category's name. Thresholds
// are configuration, immutable after load.

use super::traits::ToxicityScores;

/// The harmful-content categories the gate evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Toxicity,
    SevereToxicity,
    Profanity,
    SexuallyExplicit,
    Threat,
    Insult,
}

impl Category {
    /// Human-readable name used in rejection messages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Toxicity => "toxicity",
            Category::SevereToxicity => "severe toxicity",
            Category::Profanity => "profanity",
            Category::SexuallyExplicit => "sexually explicit content",
            Category::Threat => "threat",
            Category::Insult => "insult",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-category score thresholds, each in (0, 1]. A score must strictly
/// exceed its threshold to flag.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub toxicity: f64,
    pub severe_toxicity: f64,
    pub profanity: f64,
    pub sexually_explicit: f64,
    pub threat: f64,
    pub insult: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        // Deliberately strict for a family-friendly wall; severe toxicity
        // and threats cut off well below the milder categories.
        Self {
            toxicity: 0.5,
            severe_toxicity: 0.3,
            profanity: 0.5,
            sexually_explicit: 0.5,
            threat: 0.3,
            insult: 0.5,
        }
    }
}

/// The gate's decision for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateVerdict {
    Pass,
    Flagged(Category),
}

/// Compare each present score against its threshold. The first category
/// to exceed wins; evaluation order matches the category listing.
pub fn evaluate(scores: &ToxicityScores, thresholds: &Thresholds) -> GateVerdict {
    let checks = [
        (Category::Toxicity, Some(scores.toxicity), thresholds.toxicity),
        (
            Category::SevereToxicity,
            scores.severe_toxicity,
            thresholds.severe_toxicity,
        ),
        (Category::Profanity, scores.profanity, thresholds.profanity),
        (
            Category::SexuallyExplicit,
            scores.sexually_explicit,
            thresholds.sexually_explicit,
        ),
        (Category::Threat, scores.threat, thresholds.threat),
        (Category::Insult, scores.insult, thresholds.insult),
    ];

    for (category, score, threshold) in checks {
        if let Some(score) = score {
            if score > threshold {
                return GateVerdict::Flagged(category);
            }
        }
    }
    GateVerdict::Pass
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_scores_pass() {
        let scores = ToxicityScores {
            toxicity: 0.1,
            severe_toxicity: Some(0.05),
            ..Default::default()
        };
        assert_eq!(evaluate(&scores, &Thresholds::default()), GateVerdict::Pass);
    }

    #[test]
    fn score_at_threshold_passes() {
        let scores = ToxicityScores {
            toxicity: 0.5,
            ..Default::default()
        };
        assert_eq!(evaluate(&scores, &Thresholds::default()), GateVerdict::Pass);
    }

    #[test]
    fn score_above_threshold_flags_with_category() {
        let scores = ToxicityScores {
            toxicity: 0.2,
            threat: Some(0.31),
            ..Default::default()
        };
        assert_eq!(
            evaluate(&scores, &Thresholds::default()),
            GateVerdict::Flagged(Category::Threat)
        );
    }

    #[test]
    fn missing_categories_cannot_flag() {
        let scores = ToxicityScores {
            toxicity: 0.0,
            severe_toxicity: None,
            profanity: None,
            sexually_explicit: None,
            threat: None,
            insult: None,
        };
        assert_eq!(evaluate(&scores, &Thresholds::default()), GateVerdict::Pass);
    }
}
