// Submission client — what the CLI uses to talk to a running server.
//
// The client owns the advisory quota: it consults the local fixed-window
// limiter before each POST and paces consecutive submissions with a
// minimum inter-submission interval, independent of the quota counter.
// Neither is a security boundary; the server pipeline re-checks content
// regardless.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use tokio::time::Duration;

use crate::store::Fortune;
use crate::toxicity::pacing::Pacer;

/// Minimum gap between consecutive submissions from one client run.
pub const MIN_SUBMIT_INTERVAL: Duration = Duration::from_secs(2);

/// What the server said about one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Duplicate,
    Rejected(String),
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    pacer: Pacer,
}

#[derive(Deserialize)]
struct FortunesResponse {
    fortunes: Vec<Fortune>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    #[serde(default)]
    is_duplicate: bool,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            pacer: Pacer::with_interval(MIN_SUBMIT_INTERVAL),
        }
    }

    /// GET /api/fortunes — the wall, newest first.
    pub async fn fetch_fortunes(&self) -> Result<Vec<Fortune>> {
        let url = format!("{}/api/fortunes", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("Server returned {}", response.status());
        }

        let body: FortunesResponse = response
            .json()
            .await
            .context("Failed to parse fortunes response")?;
        Ok(body.fortunes)
    }

    /// POST /api/fortunes — submit one fortune, paced.
    pub async fn submit(&self, text: &str) -> Result<SubmitOutcome> {
        self.pacer.acquire().await;

        let url = format!("{}/api/fortunes", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?;

        match response.status() {
            status if status.is_success() => {
                let body: SubmitResponse = response
                    .json()
                    .await
                    .context("Failed to parse submit response")?;
                Ok(if body.is_duplicate {
                    SubmitOutcome::Duplicate
                } else {
                    SubmitOutcome::Accepted
                })
            }
            StatusCode::BAD_REQUEST => {
                let body: ErrorResponse = response
                    .json()
                    .await
                    .context("Failed to parse rejection response")?;
                Ok(SubmitOutcome::Rejected(body.error))
            }
            status => anyhow::bail!("Server returned {status}"),
        }
    }
}
