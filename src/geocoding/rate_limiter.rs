use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Enforces a minimum wall-clock gap between the starts of successive calls.
///
/// The lock is held while waiting, so callers are admitted one at a time in
/// arrival order and the gap holds globally, not per caller.
#[derive(Debug)]
pub struct RateLimiter {
    min_delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_call: Mutex::new(None),
        }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Wait until a call may start, then mark it as started.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let now = Instant::now();
            match previous.checked_add(self.min_delay) {
                Some(ready_at) if ready_at > now => {
                    debug!("Rate limiter waiting {:?}", ready_at - now);
                    tokio::time::sleep_until(ready_at).await;
                }
                Some(_) => {}
                // Past the clock's range: tokio clamps the sleep itself.
                None => tokio::time::sleep(self.min_delay).await,
            }
        }

        *last_call = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::utils::constants::DEFAULT_MIN_DELAY_SECS))
    }
}
