use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::global_constants;

/// Bounds the wait for an asynchronous OCR job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval_ms: u64,
    /// 1.0 keeps the interval fixed.
    pub backoff_factor: f64,
    pub max_interval_ms: u64,
    /// Spreads each delay by up to ±25%.
    #[serde(default)]
    pub jitter: bool,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: global_constants::DEFAULT_POLL_MAX_ATTEMPTS,
            interval_ms: global_constants::DEFAULT_POLL_INTERVAL_MS,
            backoff_factor: global_constants::DEFAULT_POLL_BACKOFF_FACTOR,
            max_interval_ms: global_constants::DEFAULT_POLL_MAX_INTERVAL_MS,
            jitter: false,
        }
    }
}

impl PollPolicy {
    #[cfg(test)]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            interval_ms: 0,
            backoff_factor: 1.0,
            max_interval_ms: 0,
            jitter: false,
        }
    }

    /// Delay to wait after poll attempt `attempt_number` (1-indexed).
    pub fn delay_after(&self, attempt_number: u32) -> Duration {
        if attempt_number == 0 {
            return Duration::ZERO;
        }

        let factor = self.backoff_factor.max(1.0);
        let delay_ms = self.interval_ms as f64 * factor.powi((attempt_number - 1) as i32);
        let cap_ms = self.max_interval_ms.max(self.interval_ms) as f64;
        let delay_ms = delay_ms.min(cap_ms) as u64;

        let delay_ms = if self.jitter {
            let spread = (delay_ms / 4) as i64;
            let offset = if spread > 0 {
                (next_jitter_seed() % (spread as u64 * 2)) as i64 - spread
            } else {
                0
            };
            (delay_ms as i64 + offset).max(0) as u64
        } else {
            delay_ms
        };

        Duration::from_millis(delay_ms)
    }

    pub fn has_attempts_left(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }
}

fn next_jitter_seed() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static SEED: AtomicU64 = AtomicU64::new(0x9e37_79b9_7f4a_7c15);
    let x = SEED.load(Ordering::Relaxed);
    let x = x ^ (x << 13);
    let x = x ^ (x >> 7);
    let x = x ^ (x << 17);
    SEED.store(x, Ordering::Relaxed);
    x
}
