// Content moderation — the admission pipeline and its building blocks.
//
// Layered leaf-first: `leet` expands banned roots into look-alike variants,
// `lexicon` matches them against submissions, `patterns` holds the
// regex/scan heuristics, and `pipeline` orchestrates the whole gate
// sequence including the toxicity check and persistence.

pub mod leet;
pub mod lexicon;
pub mod patterns;
pub mod pipeline;

pub use lexicon::Lexicon;
pub use pipeline::{Admission, AdmissionPipeline, RejectReason};

/// Length bounds and strictness knobs for the admission pipeline.
///
/// Two profiles exist in the wild: the classic one (42-char max, no
/// minimum, no extended content-shape checks) and the strict one
/// (30-char max, 3-char minimum, extended checks on). Strict is the
/// default; pick via FORTUNA_PROFILE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModerationProfile {
    pub max_length: usize,
    pub min_length: Option<usize>,
    pub extended_checks: bool,
}

impl ModerationProfile {
    pub fn strict() -> Self {
        Self {
            max_length: 30,
            min_length: Some(3),
            extended_checks: true,
        }
    }

    pub fn classic() -> Self {
        Self {
            max_length: 42,
            min_length: None,
            extended_checks: false,
        }
    }
}

impl Default for ModerationProfile {
    fn default() -> Self {
        Self::strict()
    }
}
