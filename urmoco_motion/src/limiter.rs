//! Explicit token-bucket rate limiter.
//!
//! Admission control for externally-triggered moves: at most `capacity`
//! moves per `refill_interval`. The bucket starts full. `try_acquire` is
//! non-blocking; `acquire` sleeps until a token is available and is only
//! called from the coordinator's admission path, never from dispatch.

use std::thread;
use std::time::{Duration, Instant};

/// Token bucket with a fixed refill interval per token.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: u32,
    tokens: u32,
    refill_interval: Duration,
    last_refill: Instant,
}

impl TokenBucket {
    /// Create a full bucket. `refill_interval` must be non-zero.
    pub fn new(capacity: u32, refill_interval: Duration) -> Self {
        debug_assert!(capacity > 0);
        debug_assert!(!refill_interval.is_zero());
        Self {
            capacity,
            tokens: capacity,
            refill_interval,
            last_refill: Instant::now(),
        }
    }

    /// Take a token if one is available.
    pub fn try_acquire(&mut self) -> bool {
        self.refill();
        if self.tokens > 0 {
            self.tokens -= 1;
            true
        } else {
            false
        }
    }

    /// Block until a token is available, then take it.
    pub fn acquire(&mut self) {
        loop {
            if self.try_acquire() {
                return;
            }
            let wait = self.next_refill_in();
            if wait.is_zero() {
                // Refill boundary reached between the check and here.
                continue;
            }
            thread::sleep(wait);
        }
    }

    /// Time until the next token is granted.
    pub fn next_refill_in(&self) -> Duration {
        self.refill_interval
            .saturating_sub(self.last_refill.elapsed())
    }

    /// Tokens currently available (after refill accounting).
    pub fn available(&mut self) -> u32 {
        self.refill();
        self.tokens
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill);
        if elapsed < self.refill_interval {
            return;
        }
        let intervals = (elapsed.as_nanos() / self.refill_interval.as_nanos()) as u64;
        let gained = intervals.min(u64::from(self.capacity)) as u32;
        self.tokens = (self.tokens + gained).min(self.capacity);
        if self.tokens == self.capacity {
            // Saturated: further idle time earns nothing.
            self.last_refill = now;
        } else {
            // intervals < capacity here, so the cast cannot truncate.
            self.last_refill += self.refill_interval * (intervals as u32);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(20);

    #[test]
    fn starts_full() {
        let mut bucket = TokenBucket::new(3, INTERVAL);
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
    }

    #[test]
    fn refills_after_interval() {
        let mut bucket = TokenBucket::new(1, INTERVAL);
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
        thread::sleep(INTERVAL + Duration::from_millis(5));
        assert!(bucket.try_acquire());
    }

    #[test]
    fn refill_is_capped_at_capacity() {
        let mut bucket = TokenBucket::new(2, Duration::from_millis(5));
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());
        // Idle for many intervals; still only two tokens.
        thread::sleep(Duration::from_millis(40));
        assert_eq!(bucket.available(), 2);
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
    }

    #[test]
    fn acquire_blocks_until_refill() {
        let mut bucket = TokenBucket::new(1, INTERVAL);
        assert!(bucket.try_acquire());

        let start = Instant::now();
        bucket.acquire();
        let elapsed = start.elapsed();
        assert!(
            elapsed >= INTERVAL - Duration::from_millis(2),
            "acquire returned after {elapsed:?}, expected ~{INTERVAL:?}"
        );
    }

    #[test]
    fn acquire_returns_immediately_when_token_available() {
        let mut bucket = TokenBucket::new(1, Duration::from_secs(60));
        let start = Instant::now();
        bucket.acquire();
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
