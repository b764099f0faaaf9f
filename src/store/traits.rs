// Storage trait — backend-agnostic async interface.
//
// Implementors: SqliteStore (wraps rusqlite), MemoryStore (tests and the
// offline `check` command). All methods are async so sync backends
// (rusqlite via Mutex) and any future native-async backend fit behind a
// single interface.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{AppendOutcome, Fortune};

#[async_trait]
pub trait FortuneStore: Send + Sync {
    /// All stored fortunes, newest first.
    async fn get_all(&self) -> Result<Vec<Fortune>>;

    /// Append unless a case-insensitive equal fortune is already stored.
    ///
    /// Must be atomic with respect to concurrent callers — the pipeline's
    /// duplicate check reads a snapshot and cannot prevent two in-flight
    /// submissions of the same text on its own.
    async fn append_if_absent(&self, fortune: Fortune) -> Result<AppendOutcome>;

    /// Number of stored fortunes.
    async fn count(&self) -> Result<usize>;

    /// Insert starter fortunes if the store is empty. Returns how many
    /// were inserted.
    async fn seed_defaults(&self, texts: &[&str]) -> Result<usize>;
}
