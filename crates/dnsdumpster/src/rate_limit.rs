//! Client-side request throttling
//!
//! Enforces a minimum spacing between requests made through one client.
//! When a request arrives inside the window the caller waits for the full
//! interval, not the remaining part of it.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::clock::Clock;

/// Default spacing between requests: one request per 2 seconds
pub const RATE_LIMIT_INTERVAL: Duration = Duration::from_secs(2);

/// Tracks when the last request finished.
pub struct RateLimiter {
    interval: Duration,
    clock: Arc<dyn Clock>,
    last_request_at: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            interval,
            clock,
            last_request_at: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// When the last request finished, if any
    pub async fn last_request_at(&self) -> Option<Instant> {
        *self.last_request_at.lock().await
    }

    /// Wait for the gate, then hand out the permit for one request.
    ///
    /// The permit keeps the state locked until it is dropped, at which point
    /// the current time is recorded as the last request time. Concurrent
    /// callers queue behind it.
    pub async fn acquire(&self) -> RateLimitPermit<'_> {
        let state = self.last_request_at.lock().await;

        if let Some(last) = *state {
            let elapsed = self.clock.now().saturating_duration_since(last);
            if elapsed < self.interval {
                info!(
                    "Rate limiting: last request {:?} ago, waiting {:?}",
                    elapsed, self.interval
                );
                self.clock.sleep(self.interval).await;
            }
        }

        RateLimitPermit {
            state,
            clock: self.clock.as_ref(),
        }
    }
}

/// Exclusive right to issue one request. Records the request time on drop.
pub struct RateLimitPermit<'a> {
    state: MutexGuard<'a, Option<Instant>>,
    clock: &'a dyn Clock,
}

impl Drop for RateLimitPermit<'_> {
    fn drop(&mut self) {
        let now = self.clock.now();
        debug!("Recording request time");
        *self.state = Some(now);
    }
}
