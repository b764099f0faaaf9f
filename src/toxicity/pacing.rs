// Token-bucket pacing for outbound calls.
//
// Perspective API's free tier allows 1 QPS, and the submission client
// enforces a minimum inter-submission interval with the same mechanism.
// One token per interval; a caller that arrives early sleeps until its
// token is available.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// A simple rate limiter that enforces a minimum interval between calls.
#[derive(Clone)]
pub struct Pacer {
    inner: Arc<Mutex<PacerInner>>,
}

struct PacerInner {
    /// Minimum time between requests
    interval: Duration,
    /// When the last request was allowed through
    last_request: Option<Instant>,
}

impl Pacer {
    /// Allow `requests_per_second` requests per second.
    pub fn per_second(requests_per_second: f64) -> Self {
        Self::with_interval(Duration::from_secs_f64(1.0 / requests_per_second))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PacerInner {
                interval,
                last_request: None,
            })),
        }
    }

    /// Wait until a request is allowed, then return.
    ///
    /// If we're within the rate limit, this returns immediately.
    /// If we need to wait, it sleeps for the appropriate duration.
    pub async fn acquire(&self) {
        let mut inner = self.inner.lock().await;
        let now = Instant::now();

        if let Some(last) = inner.last_request {
            let elapsed = now.duration_since(last);
            if elapsed < inner.interval {
                let sleep_time = inner.interval - elapsed;
                // Drop the lock before sleeping so other tasks aren't blocked
                drop(inner);
                tokio::time::sleep(sleep_time).await;
                // Re-acquire after sleeping
                inner = self.inner.lock().await;
            }
        }

        inner.last_request = Some(Instant::now());
    }
}
