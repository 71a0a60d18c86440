//! Exponential backoff with optional jitter.
//!
//! # Algorithm
//! ```text
//! raw   = initial * factor ^ attempt
//! delay = min(raw, max)                      (jitter disabled)
//! delay = uniform[initial, min(raw, max))    (jitter enabled)
//! ```
//!
//! # Design Decisions
//! - Construction never fails: zero or negative settings fall back to defaults
//! - A raw delay outside the representable range returns `max` directly
//! - One generator per retry loop; `&mut self` keeps it single-owner

use std::time::Duration;
use rand::Rng;

use crate::config::BackoffConfig;

/// Initial delay used when the configured one is zero.
pub const DEFAULT_INITIAL: Duration = Duration::from_millis(200);

/// Maximum delay used when the configured one is zero.
pub const DEFAULT_MAX: Duration = Duration::from_secs(10);

/// Growth factor used when the configured one is not positive.
pub const DEFAULT_FACTOR: f64 = 2.0;

/// Stateful exponential backoff generator.
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    attempt: u32,
    initial: Duration,
    max: Duration,
    factor: f64,
    jitter: bool,
}

impl ExponentialBackoff {
    /// Create a new generator. Invalid settings are replaced with the defaults.
    pub fn new(initial: Duration, max: Duration, factor: f64, jitter: bool) -> Self {
        let initial = if initial.is_zero() { DEFAULT_INITIAL } else { initial };
        let max = if max.is_zero() { DEFAULT_MAX } else { max };
        let factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            DEFAULT_FACTOR
        };

        Self {
            attempt: 0,
            initial,
            max,
            factor,
            jitter,
        }
    }

    /// Create a generator from the `[backoff]` configuration section.
    pub fn from_config(config: &BackoffConfig) -> Self {
        Self::new(
            Duration::from_millis(config.initial_ms),
            Duration::from_millis(config.max_ms),
            config.factor,
            config.jitter,
        )
    }

    /// Return the delay for the current attempt, then advance the attempt counter.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.delay_for(self.attempt);
        self.attempt = self.attempt.saturating_add(1);
        delay
    }

    /// Start over from the first attempt.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Number of delays handed out since construction or the last reset.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn initial(&self) -> Duration {
        self.initial
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn jitter(&self) -> bool {
        self.jitter
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let initial = self.initial.as_nanos() as f64;
        let raw = initial * self.factor.powf(f64::from(attempt));

        if !raw.is_finite() || raw > i64::MAX as f64 {
            return self.max;
        }

        let capped = Duration::from_nanos(raw as u64).min(self.max);

        if self.jitter {
            let low = self.initial.as_nanos() as u64;
            let high = capped.as_nanos() as u64;
            if low < high {
                let jittered = rand::thread_rng().gen_range(low..high);
                return Duration::from_nanos(jittered);
            }
        }

        capped
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL, DEFAULT_MAX, DEFAULT_FACTOR, false)
    }
}
