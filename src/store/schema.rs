// Schema — table creation.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet.
///
/// This is idempotent — safe to call on every startup. The UNIQUE
/// constraint on text_lower is what makes append_if_absent atomic:
/// INSERT OR IGNORE either writes the row or leaves the store untouched.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS fortunes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            text_lower TEXT NOT NULL UNIQUE,   -- case-insensitive dedup key
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            is_default INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
    .context("Failed to create tables")?;
    Ok(())
}
