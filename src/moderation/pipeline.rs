// Admission pipeline — the ordered gate sequence a submitted fortune
// must pass before persistence.
//
// Stages short-circuit: the first failing check wins and its reason is
// the only one reported. A duplicate is not a failure — it's reported as
// success-with-a-flag and nothing is written. Persistence happens only
// after every prior stage passes, via the store's atomic conditional
// append (the read-side duplicate check runs against a snapshot and
// cannot exclude concurrent submitters on its own).

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::store::{AppendOutcome, Fortune, FortuneStore};
use crate::toxicity::{gate, GateVerdict, Thresholds, ToxicityScorer};

use super::lexicon::Lexicon;
use super::patterns;
use super::ModerationProfile;

/// Why a submission was turned away. `Display` yields the user-visible
/// message; these are domain outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    TooLong,
    TooShort,
    DisallowedCharacters,
    BannedLanguage,
    Spam,
    Suspicious,
    RepeatedPunctuation,
    AllCaps,
    Url,
    ContactInfo,
    ExcessiveSpacing,
    TooManyEmoji,
    /// The toxicity gate flagged a category (human-readable label).
    Flagged(crate::toxicity::Category),
    /// The toxicity service was configured but unreachable or errored —
    /// the gate fails closed.
    ContentCheckFailed,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::Empty => write!(f, "Invalid fortune text"),
            RejectReason::TooLong => write!(f, "Fortune too long"),
            RejectReason::TooShort => write!(f, "Fortune too short"),
            RejectReason::DisallowedCharacters => write!(
                f,
                "Only letters, numbers, emojis, and basic punctuation (!#%?.,:'\"$_-) are allowed"
            ),
            RejectReason::BannedLanguage => {
                write!(f, "Your fortune contains inappropriate language")
            }
            RejectReason::Spam => write!(f, "Please avoid repetitive content"),
            RejectReason::Suspicious => write!(f, "Your fortune contains suspicious patterns"),
            RejectReason::RepeatedPunctuation => write!(f, "Please avoid excessive punctuation"),
            RejectReason::AllCaps => write!(f, "Please avoid using all capital letters"),
            RejectReason::Url => write!(f, "URLs are not allowed in fortunes"),
            RejectReason::ContactInfo => {
                write!(f, "Personal contact information is not allowed")
            }
            RejectReason::ExcessiveSpacing => write!(f, "Please avoid excessive spacing"),
            RejectReason::TooManyEmoji => write!(f, "Please use fewer emoji"),
            RejectReason::Flagged(category) => write!(f, "Content was flagged for {category}"),
            RejectReason::ContentCheckFailed => write!(f, "Content moderation check failed"),
        }
    }
}

/// Outcome of one submission attempt.
#[derive(Debug, Clone)]
pub enum Admission {
    /// Persisted; the stored record is returned.
    Accepted(Fortune),
    /// A case-insensitive equal fortune already exists; nothing written.
    Duplicate,
    Rejected(RejectReason),
}

/// The pipeline itself: lexicon and thresholds are built once and shared
/// read-only; the scorer is optional — without one the toxicity gate is
/// skipped entirely.
pub struct AdmissionPipeline {
    lexicon: Lexicon,
    profile: ModerationProfile,
    thresholds: Thresholds,
    store: Arc<dyn FortuneStore>,
    scorer: Option<Arc<dyn ToxicityScorer>>,
}

impl AdmissionPipeline {
    pub fn new(
        lexicon: Lexicon,
        profile: ModerationProfile,
        store: Arc<dyn FortuneStore>,
        scorer: Option<Arc<dyn ToxicityScorer>>,
    ) -> Self {
        Self {
            lexicon,
            profile,
            thresholds: Thresholds::default(),
            store,
            scorer,
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Run the full gate sequence and, on success, persist the fortune.
    ///
    /// `Err` is reserved for real faults (storage, internal); every
    /// moderation outcome is in the `Admission` value.
    pub async fn submit(&self, text: &str) -> Result<Admission> {
        let trimmed = text.trim();

        if let Some(reason) = self.moderate(trimmed).await {
            info!(reason = %reason, "Submission rejected");
            return Ok(Admission::Rejected(reason));
        }

        // Read-side duplicate check: short-circuits before the outbound
        // toxicity call, but the write below is what actually excludes
        // concurrent duplicates.
        let lowered = trimmed.to_lowercase();
        let existing = self.store.get_all().await?;
        if existing.iter().any(|f| f.text.to_lowercase() == lowered) {
            return Ok(Admission::Duplicate);
        }

        if let Some(reason) = self.toxicity_gate(trimmed).await {
            info!(reason = %reason, "Submission rejected by toxicity gate");
            return Ok(Admission::Rejected(reason));
        }

        if self.profile.extended_checks {
            if let Some(reason) = content_shape_check(trimmed) {
                info!(reason = %reason, "Submission rejected by content-shape check");
                return Ok(Admission::Rejected(reason));
            }
        }

        let fortune = Fortune::new(trimmed);
        match self.store.append_if_absent(fortune.clone()).await? {
            AppendOutcome::Inserted => {
                info!(text = %fortune.text, "Fortune admitted");
                Ok(Admission::Accepted(fortune))
            }
            // Lost the race against a concurrent equal submission
            AppendOutcome::AlreadyPresent => Ok(Admission::Duplicate),
        }
    }

    /// Validation and local moderation stages (everything before the
    /// duplicate check). Used directly by the offline `check` command.
    pub async fn moderate(&self, trimmed: &str) -> Option<RejectReason> {
        if trimmed.is_empty() {
            return Some(RejectReason::Empty);
        }
        let length = trimmed.chars().count();
        if length > self.profile.max_length {
            return Some(RejectReason::TooLong);
        }
        if let Some(min) = self.profile.min_length {
            if length < min {
                return Some(RejectReason::TooShort);
            }
        }
        if !patterns::is_structurally_valid(trimmed) {
            return Some(RejectReason::DisallowedCharacters);
        }
        if self.lexicon.contains_banned(trimmed) {
            return Some(RejectReason::BannedLanguage);
        }
        if patterns::is_spam(trimmed) {
            return Some(RejectReason::Spam);
        }
        if patterns::is_suspicious(trimmed) {
            return Some(RejectReason::Suspicious);
        }
        None
    }

    /// The external toxicity gate. Skipped when no scorer is configured;
    /// fails closed when the configured service errors.
    async fn toxicity_gate(&self, trimmed: &str) -> Option<RejectReason> {
        let scorer = self.scorer.as_ref()?;
        match scorer.score_text(trimmed).await {
            Ok(scores) => match gate::evaluate(&scores, &self.thresholds) {
                GateVerdict::Pass => None,
                GateVerdict::Flagged(category) => Some(RejectReason::Flagged(category)),
            },
            Err(error) => {
                warn!(%error, "Toxicity check failed; rejecting submission");
                Some(RejectReason::ContentCheckFailed)
            }
        }
    }
}

/// Extended content-shape checks (strict profile). Each predicate rejects
/// independently; first hit wins.
fn content_shape_check(trimmed: &str) -> Option<RejectReason> {
    if patterns::has_repeated_punctuation(trimmed) {
        return Some(RejectReason::RepeatedPunctuation);
    }
    if patterns::is_all_caps(trimmed) {
        return Some(RejectReason::AllCaps);
    }
    if patterns::contains_url(trimmed) {
        return Some(RejectReason::Url);
    }
    if patterns::contains_email(trimmed) || patterns::contains_phone_number(trimmed) {
        return Some(RejectReason::ContactInfo);
    }
    if patterns::has_excessive_spacing(trimmed) {
        return Some(RejectReason::ExcessiveSpacing);
    }
    if patterns::too_many_emoji(trimmed) {
        return Some(RejectReason::TooManyEmoji);
    }
    if patterns::has_long_char_run(trimmed) {
        return Some(RejectReason::Spam);
    }
    None
}
