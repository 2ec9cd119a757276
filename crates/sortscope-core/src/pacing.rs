//! Pacing between primitive operations.
//!
//! A sort paced at a fixed delay per step would take far longer on large
//! arrays, so the base delay shrinks with the square root of the element
//! count. The user speed setting then interpolates the base delay toward the
//! minimum:
//!
//! ```text
//! base  = max_delay / sqrt(n)
//! delay = base - (base - min_delay) * speed / 100
//! ```
//!
//! The result is clamped to `[min_delay, max_delay]`. It is monotone
//! non-increasing in both `n` and `speed`. The arithmetic runs on integer
//! nanoseconds so rounding never breaks that.
//!
//! # Example
//!
//! ```rust
//! use sortscope_core::PacingPolicy;
//! use std::time::Duration;
//!
//! let pacing = PacingPolicy::default();
//! assert!(pacing.delay_for(50, 100) <= pacing.delay_for(50, 0));
//! assert!(pacing.delay_for(2048, 50) <= pacing.delay_for(16, 50));
//! assert!(pacing.delay_for(50, 100) >= Duration::from_millis(1));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

/// Lower delay bound used by [`PacingPolicy::default`].
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(1);

/// Upper delay bound used by [`PacingPolicy::default`].
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_millis(150);

/// Speed setting used by [`PacingPolicy::default`].
pub const DEFAULT_SPEED: u8 = 50;

/// Highest speed setting.
pub const MAX_SPEED: u8 = 100;

/// Computes and applies the delay between primitive operations.
///
/// Clones share the speed setting, so a control surface holding one clone
/// can retune a run paced by another. A new speed takes effect on the next
/// delay computation.
#[derive(Clone, Debug)]
pub struct PacingPolicy {
    min_delay: Duration,
    max_delay: Duration,
    speed: Arc<AtomicU8>,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DELAY, DEFAULT_MAX_DELAY)
    }
}

impl PacingPolicy {
    /// Create a policy with the given bounds and the default speed.
    ///
    /// If `max_delay` is below `min_delay` it is raised to `min_delay`.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
            speed: Arc::new(AtomicU8::new(DEFAULT_SPEED)),
        }
    }

    /// A policy that never sleeps. Used for headless runs and tests.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Builder-style speed setter.
    pub fn with_speed(self, speed: u8) -> Self {
        self.set_speed(speed);
        self
    }

    /// Lower delay bound.
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Upper delay bound.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Set the speed (0..=100, higher is faster). Values above 100 are clamped.
    pub fn set_speed(&self, speed: u8) {
        self.speed.store(speed.min(MAX_SPEED), Ordering::Relaxed);
    }

    /// Current speed setting.
    pub fn speed(&self) -> u8 {
        self.speed.load(Ordering::Relaxed)
    }

    /// Delay for `n` elements at the given speed.
    pub fn delay_for(&self, n: usize, speed: u8) -> Duration {
        self.scaled_delay_for(n, speed, 1.0)
    }

    /// Delay for `n` elements at the current speed, multiplied by `factor`
    /// before clamping.
    pub fn delay_scaled(&self, n: usize, factor: f64) -> Duration {
        self.scaled_delay_for(n, self.speed(), factor)
    }

    /// Sleep for the current step delay. A zero delay returns immediately.
    pub fn pace(&self, n: usize, factor: f64) {
        let delay = self.delay_scaled(n, factor);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    fn scaled_delay_for(&self, n: usize, speed: u8, factor: f64) -> Duration {
        let min_ns = self.min_delay.as_nanos() as u64;
        let max_ns = self.max_delay.as_nanos() as u64;
        let speed = u64::from(speed.min(MAX_SPEED));

        let base = (max_ns as f64 / (n.max(1) as f64).sqrt()) as u64;
        let span = base.saturating_sub(min_ns);
        let interpolated = base - (u128::from(span) * u128::from(speed) / 100) as u64;
        let scaled = (interpolated as f64 * factor.max(0.0)) as u64;

        Duration::from_nanos(scaled.clamp(min_ns, max_ns))
    }
}
