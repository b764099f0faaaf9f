// Client-side fixed-window rate limiter.
//
// The quota is advisory: state lives in a client-local JSON file, so a
// client that deletes the file gets a fresh window. This matches the
// product's trust model — real abuse resistance would need a
// server-side counter keyed by a stable client identifier.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Submissions allowed per window.
pub const ATTEMPTS_LIMIT: u32 = 5;

/// Window length: one hour.
pub fn window() -> Duration {
    Duration::hours(1)
}

/// The persisted window state. `remaining_attempts` stays within
/// [0, limit]; `next_reset_time` is a millisecond epoch timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitState {
    pub remaining_attempts: u32,
    pub next_reset_time: i64,
}

/// Fixed-window counter. Time is always passed in, never read from the
/// clock, so window semantics are testable without sleeping.
#[derive(Debug, Clone)]
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    state: RateLimitState,
}

impl FixedWindowLimiter {
    /// A fresh limiter whose first window starts now.
    pub fn new(limit: u32, window: Duration, now: DateTime<Utc>) -> Self {
        Self {
            limit,
            window,
            state: RateLimitState {
                remaining_attempts: limit,
                next_reset_time: (now + window).timestamp_millis(),
            },
        }
    }

    /// Resume from persisted state. A stored `remaining_attempts` above
    /// the limit (stale file from an older, higher limit) is clamped.
    pub fn from_state(limit: u32, window: Duration, state: RateLimitState) -> Self {
        let state = RateLimitState {
            remaining_attempts: state.remaining_attempts.min(limit),
            ..state
        };
        Self {
            limit,
            window,
            state,
        }
    }

    pub fn state(&self) -> &RateLimitState {
        &self.state
    }

    pub fn remaining_attempts(&self) -> u32 {
        self.state.remaining_attempts
    }

    /// Try to spend one attempt.
    ///
    /// At or past the reset time the window rolls over: remaining becomes
    /// limit − 1 (this call is the new window's first consumption) and the
    /// reset moves one window ahead. Inside the window, zero remaining
    /// fails without mutation; otherwise decrement and succeed.
    pub fn consume_attempt(&mut self, now: DateTime<Utc>) -> bool {
        if now.timestamp_millis() >= self.state.next_reset_time {
            self.state = RateLimitState {
                // saturating: a zero-capacity limiter rolls over to an
                // already-exhausted window instead of underflowing
                remaining_attempts: self.limit.saturating_sub(1),
                next_reset_time: (now + self.window).timestamp_millis(),
            };
            return true;
        }

        if self.state.remaining_attempts == 0 {
            return false;
        }

        self.state.remaining_attempts -= 1;
        true
    }

    /// Read-only countdown until the window resets, for display.
    pub fn countdown(&self, now: DateTime<Utc>) -> String {
        let remaining_ms = (self.state.next_reset_time - now.timestamp_millis()).max(0);
        let minutes = remaining_ms / 60_000;
        let seconds = (remaining_ms % 60_000) / 1_000;
        format!("{minutes}m {seconds}s")
    }

    /// Load persisted state from `path`, or start a fresh window if the
    /// file is missing or unreadable.
    pub fn load(path: &Path, limit: u32, window: Duration, now: DateTime<Utc>) -> Self {
        let stored = fs::read_to_string(path)
            .ok()
            .and_then(|json| serde_json::from_str::<RateLimitState>(&json).ok());
        match stored {
            Some(state) => Self::from_state(limit, window, state),
            None => Self::new(limit, window, now),
        }
    }

    /// Persist the current state to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string(&self.state)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write rate-limit state to {}", path.display()))
    }
}
