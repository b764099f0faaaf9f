// Data models — the types that flow through the application.
//
// They're separate from the storage backends so other modules can use
// them without depending on rusqlite directly.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A stored fortune. Immutable once created; the wall is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fortune {
    pub text: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// True for the seeded starter fortunes.
    #[serde(default)]
    pub is_default: bool,
}

impl Fortune {
    /// A freshly submitted fortune, stamped now.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: Utc::now().to_rfc3339(),
            is_default: false,
        }
    }

    /// A seeded starter fortune.
    pub fn seeded(text: impl Into<String>) -> Self {
        Self {
            is_default: true,
            ..Self::new(text)
        }
    }
}

/// Result of a conditional append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Inserted,
    /// A case-insensitive equal fortune was already stored; nothing written.
    AlreadyPresent,
}
