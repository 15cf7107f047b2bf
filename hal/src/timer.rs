//! # Timer Device
//!
//! Hardware abstraction for the periodic scan tick.
//!
//! ## Philosophy
//!
//! **Time is a service, not a global variable.**
//!
//! This trait provides access to a monotonic tick counter. It does NOT:
//! - Provide wall-clock time
//! - Block or sleep (polling only)
//! - Drive the keypad by itself (that's the firmware loop)
//!
//! ## Design Principles
//!
//! 1. **Monotonic**: Ticks never go backwards
//! 2. **Non-blocking**: Always returns immediately
//! 3. **Cumulative**: Returns total ticks since boot
//!
//! The firmware expects [`TICK_HZ`] ticks per second; one keypad line is
//! scanned per tick.

/// Scan tick rate
pub const TICK_HZ: u32 = 100;

/// Milliseconds per tick
pub const TICK_PERIOD_MS: u32 = 1000 / TICK_HZ;

/// Hardware timer device trait
///
/// # Examples
///
/// ```
/// use hal::{ManualTimer, TimerDevice};
///
/// let mut timer = ManualTimer::new();
/// let start = timer.poll_ticks();
/// timer.advance(4);
/// assert_eq!(timer.poll_ticks() - start, 4);
/// ```
pub trait TimerDevice {
    /// Returns the current tick count
    ///
    /// Monotonic and cumulative since boot.
    fn poll_ticks(&mut self) -> u64;
}

/// Timer advanced explicitly by its owner
///
/// Used by the host simulator and tests in place of a hardware compare-match
/// interrupt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTimer {
    ticks: u64,
}

impl ManualTimer {
    pub const fn new() -> Self {
        Self { ticks: 0 }
    }

    /// Moves time forward by `delta` ticks
    pub fn advance(&mut self, delta: u64) {
        self.ticks = self.ticks.saturating_add(delta);
    }
}

impl TimerDevice for ManualTimer {
    fn poll_ticks(&mut self) -> u64 {
        self.ticks
    }
}

/// Converts a tick count to milliseconds
pub const fn ticks_to_millis(ticks: u64) -> u64 {
    ticks * TICK_PERIOD_MS as u64
}
