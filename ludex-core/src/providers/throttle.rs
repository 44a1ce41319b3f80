use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Spaces out catalog requests across every concurrent caller.
///
/// Each caller reserves the next free slot under the lock and sleeps
/// outside of it, so N workers never exceed one request per `interval`.
#[derive(Debug)]
pub struct RequestThrottle {
    interval: Duration,
    next_slot: Mutex<Instant>,
}

impl RequestThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_slot: Mutex::new(Instant::now()),
        }
    }

    /// Wait until this caller may issue a request.
    pub async fn acquire(&self) {
        let wait = {
            let mut next_slot = self.next_slot.lock().await;
            let now = Instant::now();
            let slot = (*next_slot).max(now);
            *next_slot = slot + self.interval;
            slot - now
        };

        if !wait.is_zero() {
            debug!(wait_ms = wait.as_millis() as u64, "throttling catalog request");
            tokio::time::sleep(wait).await;
        }
    }

    /// Push the next slot out after the catalog reported rate limiting.
    pub async fn back_off(&self, delay: Duration) {
        let mut next_slot = self.next_slot.lock().await;
        let resume_at = Instant::now() + delay;
        if resume_at > *next_slot {
            *next_slot = resume_at;
        }
    }
}
