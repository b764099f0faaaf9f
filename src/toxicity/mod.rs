// Toxicity gate — external semantic content judgment.
//
// The ToxicityScorer trait defines the interface. PerspectiveScorer
// implements it using Google's Perspective API; `gate` turns per-category
// scores into a pass/fail verdict against the configured thresholds.
// When Perspective sunsets (Dec 2026), we swap in a different scorer
// without touching the admission pipeline.

pub mod gate;
pub mod pacing;
pub mod perspective;
pub mod traits;

pub use gate::{Category, GateVerdict, Thresholds};
pub use perspective::PerspectiveScorer;
pub use traits::{ToxicityScorer, ToxicityScores};
