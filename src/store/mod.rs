// Fortune storage — an append-only, newest-first list behind a trait.
//
// The store's one non-trivial obligation is atomic conditional append:
// the pipeline's read-side duplicate check runs against a snapshot, so
// two concurrent submissions of the same text must be resolved by the
// write itself, not by the check.

pub mod memory;
pub mod models;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryStore;
pub use models::{AppendOutcome, Fortune};
pub use sqlite::SqliteStore;
pub use traits::FortuneStore;

/// Starter fortunes shown before the community has submitted anything.
pub const DEFAULT_FORTUNES: &[&str] = &[
    "Good things are coming your way",
    "A pleasant surprise awaits you",
    "Your hard work will pay off soon",
    "An old friend will reach out",
    "Today is a good day to start",
    "Luck favors the curious",
];
