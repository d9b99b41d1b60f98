// src/client/rate_limit.rs

use std::time::{Duration, Instant};

/// Token bucket sized to the API's per-minute allowance.
///
/// `reserve` always hands out a slot; when the bucket is empty it returns
/// how long the caller must wait before using it. Tokens may go negative so
/// back-to-back callers queue up behind each other.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: f64,
    tokens: f64,
    refill_per_sec: f64,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new(max_per_minute: u32) -> Self {
        Self::starting_at(max_per_minute, Instant::now())
    }

    fn starting_at(max_per_minute: u32, now: Instant) -> Self {
        let capacity = max_per_minute.max(1) as f64;
        Self {
            capacity,
            tokens: capacity,
            refill_per_sec: capacity / 60.0,
            last_refill: now,
        }
    }

    pub fn reserve(&mut self) -> Duration {
        self.reserve_at(Instant::now())
    }

    fn reserve_at(&mut self, now: Instant) -> Duration {
        self.refill(now);
        self.tokens -= 1.0;
        if self.tokens >= 0.0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(-self.tokens / self.refill_per_sec)
        }
    }

    fn refill(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        self.last_refill = now;
    }
}
