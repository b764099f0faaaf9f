// MemoryStore — Vec-backed FortuneStore for tests and the offline
// `check` command.
//
// The whole list sits behind one async Mutex, so the contains-check and
// the push in append_if_absent happen under a single lock acquisition —
// the same conditional-append guarantee the SQLite backend gets from its
// UNIQUE constraint.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

use super::models::{AppendOutcome, Fortune};
use super::traits::FortuneStore;

#[derive(Default)]
pub struct MemoryStore {
    // Newest first, like the SQLite ORDER BY id DESC
    fortunes: Mutex<Vec<Fortune>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FortuneStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Fortune>> {
        Ok(self.fortunes.lock().await.clone())
    }

    async fn append_if_absent(&self, fortune: Fortune) -> Result<AppendOutcome> {
        let mut fortunes = self.fortunes.lock().await;
        let lowered = fortune.text.to_lowercase();
        if fortunes.iter().any(|f| f.text.to_lowercase() == lowered) {
            return Ok(AppendOutcome::AlreadyPresent);
        }
        fortunes.insert(0, fortune);
        Ok(AppendOutcome::Inserted)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.fortunes.lock().await.len())
    }

    async fn seed_defaults(&self, texts: &[&str]) -> Result<usize> {
        let mut fortunes = self.fortunes.lock().await;
        if !fortunes.is_empty() {
            return Ok(0);
        }
        for text in texts {
            fortunes.insert(0, Fortune::seeded(*text));
        }
        Ok(texts.len())
    }
}
