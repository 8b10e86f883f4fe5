//! Session clock: the tick counter of one farm session.
//!
//! The counter is the single source of truth for elapsed simulation time.
//! Real-time pacing lives in [`runner`](crate::runner); this type only
//! counts completed ticks.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}

/// Counter of completed ticks, starting at 0 for a fresh session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FarmClock {
    /// Number of ticks applied so far.
    tick: u64,
}

impl FarmClock {
    /// Create a clock at tick 0.
    pub const fn new() -> Self {
        Self { tick: 0 }
    }

    /// Create a clock at an arbitrary tick (useful for testing).
    pub const fn from_tick(tick: u64) -> Self {
        Self { tick }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Return the current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated milliseconds elapsed at `tick_interval_ms` per tick.
    pub const fn elapsed_ms(&self, tick_interval_ms: u64) -> u64 {
        self.tick.saturating_mul(tick_interval_ms)
    }
}
