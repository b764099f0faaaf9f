// SqliteStore — rusqlite backend implementing the FortuneStore trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is
// !Send. Trait methods lock the mutex, do synchronous rusqlite work, and
// return. The lock is never held across .await points — Rust enforces
// this because MutexGuard is !Send.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use tokio::sync::Mutex;

use super::models::{AppendOutcome, Fortune};
use super::schema;
use super::traits::FortuneStore;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {path}"))?;
        schema::create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl FortuneStore for SqliteStore {
    async fn get_all(&self) -> Result<Vec<Fortune>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT text, created_at, is_default FROM fortunes ORDER BY id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Fortune {
                text: row.get(0)?,
                created_at: row.get(1)?,
                is_default: row.get::<_, i64>(2)? != 0,
            })
        })?;
        let mut fortunes = Vec::new();
        for row in rows {
            fortunes.push(row?);
        }
        Ok(fortunes)
    }

    async fn append_if_absent(&self, fortune: Fortune) -> Result<AppendOutcome> {
        let conn = self.conn.lock().await;
        let changed = conn.execute(
            "INSERT OR IGNORE INTO fortunes (text, text_lower, created_at, is_default)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                fortune.text,
                fortune.text.to_lowercase(),
                fortune.created_at,
                fortune.is_default as i64,
            ],
        )?;
        Ok(if changed > 0 {
            AppendOutcome::Inserted
        } else {
            AppendOutcome::AlreadyPresent
        })
    }

    async fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM fortunes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    async fn seed_defaults(&self, texts: &[&str]) -> Result<usize> {
        if self.count().await? > 0 {
            return Ok(0);
        }
        let conn = self.conn.lock().await;
        let mut inserted = 0;
        for text in texts {
            let fortune = Fortune::seeded(*text);
            inserted += conn.execute(
                "INSERT OR IGNORE INTO fortunes (text, text_lower, created_at, is_default)
                 VALUES (?1, ?2, ?3, 1)",
                params![fortune.text, fortune.text.to_lowercase(), fortune.created_at],
            )?;
        }
        Ok(inserted)
    }
}
