// Admission pipeline tests — stage ordering, boundaries, duplicates,
// and the toxicity gate, all over the in-memory store with stub scorers.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use fortuna::moderation::{Admission, AdmissionPipeline, Lexicon, ModerationProfile, RejectReason};
use fortuna::store::{FortuneStore, MemoryStore};
use fortuna::toxicity::{Category, ToxicityScorer, ToxicityScores};

/// Scorer that always returns the same scores.
struct FixedScorer(ToxicityScores);

#[async_trait]
impl ToxicityScorer for FixedScorer {
    async fn score_text(&self, _text: &str) -> Result<ToxicityScores> {
        Ok(self.0.clone())
    }
}

/// Scorer that simulates an unreachable service.
struct FailingScorer;

#[async_trait]
impl ToxicityScorer for FailingScorer {
    async fn score_text(&self, _text: &str) -> Result<ToxicityScores> {
        anyhow::bail!("connection refused")
    }
}

fn strict_pipeline(
    store: Arc<dyn FortuneStore>,
    scorer: Option<Arc<dyn ToxicityScorer>>,
) -> AdmissionPipeline {
    AdmissionPipeline::new(Lexicon::build(), ModerationProfile::strict(), store, scorer)
}

fn reason(admission: Admission) -> RejectReason {
    match admission {
        Admission::Rejected(reason) => reason,
        other => panic!("expected rejection, got {other:?}"),
    }
}

// ============================================================
// Structural validation and length bounds
// ============================================================

#[tokio::test]
async fn clean_fortune_is_admitted_and_persisted() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = strict_pipeline(store.clone(), None);

    let admission = pipeline.submit("Good luck finds you").await.unwrap();
    assert!(matches!(admission, Admission::Accepted(_)));
    assert_eq!(store.count().await.unwrap(), 1);
    assert_eq!(store.get_all().await.unwrap()[0].text, "Good luck finds you");
}

#[tokio::test]
async fn input_is_trimmed_before_checks() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = strict_pipeline(store.clone(), None);

    pipeline.submit("  A calm mind wins  ").await.unwrap();
    assert_eq!(store.get_all().await.unwrap()[0].text, "A calm mind wins");
}

#[tokio::test]
async fn whitespace_only_is_rejected_as_empty() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = strict_pipeline(store.clone(), None);

    assert_eq!(
        reason(pipeline.submit("   ").await.unwrap()),
        RejectReason::Empty
    );
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn length_boundaries_are_exact() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = strict_pipeline(store.clone(), None);

    // strict profile: max 30 chars
    let at_max = "abcdefghij klmnopqrst uvwxyzab";
    assert_eq!(at_max.chars().count(), 30);
    assert!(matches!(
        pipeline.submit(at_max).await.unwrap(),
        Admission::Accepted(_)
    ));

    let over_max = "abcdefghij klmnopqrst uvwxyzabc";
    assert_eq!(
        reason(pipeline.submit(over_max).await.unwrap()),
        RejectReason::TooLong
    );
}

#[tokio::test]
async fn strict_profile_enforces_minimum_length() {
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);
    assert_eq!(
        reason(pipeline.submit("no").await.unwrap()),
        RejectReason::TooShort
    );
}

#[tokio::test]
async fn classic_profile_has_no_minimum_and_longer_maximum() {
    let pipeline = AdmissionPipeline::new(
        Lexicon::build(),
        ModerationProfile::classic(),
        Arc::new(MemoryStore::new()),
        None,
    );

    assert!(matches!(
        pipeline.submit("ok").await.unwrap(),
        Admission::Accepted(_)
    ));

    let forty_two = "The stars align kindly for your plans ok!!";
    assert_eq!(forty_two.chars().count(), 42);
    assert!(matches!(
        pipeline.submit(forty_two).await.unwrap(),
        Admission::Accepted(_)
    ));
}

#[tokio::test]
async fn disallowed_characters_are_rejected() {
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);
    assert_eq!(
        reason(pipeline.submit("fifty/fifty odds").await.unwrap()),
        RejectReason::DisallowedCharacters
    );
}

// ============================================================
// Moderation stages and their ordering
// ============================================================

#[tokio::test]
async fn banned_language_is_rejected() {
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);
    assert_eq!(
        reason(pipeline.submit("you suck eggs").await.unwrap()),
        RejectReason::BannedLanguage
    );
}

#[tokio::test]
async fn repetitive_content_is_rejected_as_spam() {
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);
    assert_eq!(
        reason(pipeline.submit("win win win today").await.unwrap()),
        RejectReason::Spam
    );
}

#[tokio::test]
async fn stretched_letter_evasion_is_rejected_as_suspicious() {
    // "fuuuck this" slips past the lexicon (no expanded variant matches)
    // but the stretched-letter heuristic catches it.
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);
    assert_eq!(
        reason(pipeline.submit("fuuuck this").await.unwrap()),
        RejectReason::Suspicious
    );
}

// ============================================================
// Duplicates
// ============================================================

#[tokio::test]
async fn duplicate_is_success_with_flag_and_no_write() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = strict_pipeline(store.clone(), None);

    pipeline.submit("Fortune favors the bold").await.unwrap();
    let second = pipeline.submit("Fortune favors the bold").await.unwrap();

    assert!(matches!(second, Admission::Duplicate));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_detection_is_case_insensitive() {
    // The all-caps resubmission short-circuits at the duplicate stage,
    // before the extended all-caps check would have seen it.
    let store = Arc::new(MemoryStore::new());
    let pipeline = strict_pipeline(store.clone(), None);

    pipeline.submit("Fortune favors the bold").await.unwrap();
    let second = pipeline.submit("FORTUNE FAVORS THE BOLD").await.unwrap();

    assert!(matches!(second, Admission::Duplicate));
    assert_eq!(store.count().await.unwrap(), 1);
}

// ============================================================
// Toxicity gate
// ============================================================

#[tokio::test]
async fn gate_flags_category_above_threshold() {
    let scorer = FixedScorer(ToxicityScores {
        toxicity: 0.2,
        threat: Some(0.9),
        ..Default::default()
    });
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), Some(Arc::new(scorer)));

    let rejection = reason(pipeline.submit("kind words cost nothing").await.unwrap());
    assert_eq!(rejection, RejectReason::Flagged(Category::Threat));
    assert_eq!(rejection.to_string(), "Content was flagged for threat");
}

#[tokio::test]
async fn gate_passes_benign_scores() {
    let scorer = FixedScorer(ToxicityScores {
        toxicity: 0.1,
        ..Default::default()
    });
    let store = Arc::new(MemoryStore::new());
    let pipeline = strict_pipeline(store.clone(), Some(Arc::new(scorer)));

    assert!(matches!(
        pipeline.submit("kind words cost nothing").await.unwrap(),
        Admission::Accepted(_)
    ));
}

#[tokio::test]
async fn unreachable_service_fails_closed() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = strict_pipeline(store.clone(), Some(Arc::new(FailingScorer)));

    assert_eq!(
        reason(pipeline.submit("kind words cost nothing").await.unwrap()),
        RejectReason::ContentCheckFailed
    );
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_scorer_skips_the_gate() {
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);
    assert!(matches!(
        pipeline.submit("kind words cost nothing").await.unwrap(),
        Admission::Accepted(_)
    ));
}

#[tokio::test]
async fn duplicate_short_circuits_before_the_gate() {
    // A duplicate must not burn a toxicity call — the failing scorer
    // would otherwise reject it.
    let store = Arc::new(MemoryStore::new());
    let no_gate = strict_pipeline(store.clone(), None);
    no_gate.submit("Fortune favors the bold").await.unwrap();

    let gated = strict_pipeline(store.clone(), Some(Arc::new(FailingScorer)));
    assert!(matches!(
        gated.submit("Fortune favors the bold").await.unwrap(),
        Admission::Duplicate
    ));
}

// ============================================================
// Extended content-shape checks (strict profile)
// ============================================================

#[tokio::test]
async fn contact_information_is_rejected() {
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);
    assert_eq!(
        reason(pipeline.submit("call 0123456789 now").await.unwrap()),
        RejectReason::ContactInfo
    );
}

#[tokio::test]
async fn shouting_is_rejected() {
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);
    assert_eq!(
        reason(pipeline.submit("GOOD THINGS AHEAD").await.unwrap()),
        RejectReason::AllCaps
    );
}

#[tokio::test]
async fn too_many_emoji_is_rejected() {
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);
    assert_eq!(
        reason(pipeline.submit("🍀 🌟 🎉 🔥 🌈 💫").await.unwrap()),
        RejectReason::TooManyEmoji
    );
}

#[tokio::test]
async fn content_shape_rejections_go_beyond_the_local_stages() {
    // moderate() covers only the local validation stages; a full dry run
    // must still apply the content-shape checks, so anything previewing a
    // verdict has to drive submit(), not moderate().
    let pipeline = strict_pipeline(Arc::new(MemoryStore::new()), None);

    assert!(pipeline.moderate("GOOD THINGS AHEAD").await.is_none());
    assert_eq!(
        reason(pipeline.submit("GOOD THINGS AHEAD").await.unwrap()),
        RejectReason::AllCaps
    );
}

#[tokio::test]
async fn classic_profile_skips_extended_checks() {
    let pipeline = AdmissionPipeline::new(
        Lexicon::build(),
        ModerationProfile::classic(),
        Arc::new(MemoryStore::new()),
        None,
    );
    assert!(matches!(
        pipeline.submit("GOOD THINGS AHEAD").await.unwrap(),
        Admission::Accepted(_)
    ));
}
