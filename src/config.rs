use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::moderation::ModerationProfile;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    pub db_path: String,
    /// Perspective API key. When empty the toxicity gate is skipped
    /// entirely — an operational fallback, not a security guarantee.
    pub perspective_api_key: String,
    /// Which moderation profile the admission pipeline runs under.
    pub profile: ModerationProfile,
    /// Base URL the submission client talks to.
    pub server_url: String,
    /// Directory holding client-local state (the rate-limit window file).
    pub state_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default — the server runs without a Perspective
    /// key, it just admits fortunes without the toxicity gate.
    pub fn load() -> Result<Self> {
        let profile = match env::var("FORTUNA_PROFILE").as_deref() {
            Ok("classic") => ModerationProfile::classic(),
            // "strict" or unset both default to the strict profile
            _ => ModerationProfile::strict(),
        };

        let state_dir = env::var("FORTUNA_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_state_dir());

        Ok(Self {
            db_path: env::var("FORTUNA_DB_PATH").unwrap_or_else(|_| "./fortuna.db".to_string()),
            perspective_api_key: env::var("PERSPECTIVE_API_KEY").unwrap_or_default(),
            profile,
            server_url: env::var("FORTUNA_SERVER_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string()),
            state_dir,
        })
    }

    /// Whether the toxicity gate is configured at all.
    pub fn toxicity_enabled(&self) -> bool {
        !self.perspective_api_key.is_empty()
    }

    /// Path of the client-local rate-limit state file.
    pub fn rate_limit_path(&self) -> PathBuf {
        self.state_dir.join("rate_limit.json")
    }
}

/// Platform data dir, e.g. ~/.local/share/fortuna on Linux.
fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fortuna")
}
