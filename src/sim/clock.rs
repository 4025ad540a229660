//! Clock driver.
//!
//! Produces one clock edge per scheduler tick, so a full clock period spans
//! two ticks and the device model is evaluated on both the rising and the
//! falling edge.

use crate::common::ClockSignal;

/// Square-wave generator for the design's clock input.
#[derive(Debug, Clone, Default)]
pub struct ClockDriver {
    level: ClockSignal,
    edges: u64,
}

impl ClockDriver {
    /// Creates a driver resting at `Low`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the clock and returns the new level.
    ///
    /// The first call returns `High`.
    pub fn tick(&mut self) -> ClockSignal {
        self.level = !self.level;
        self.edges += 1;
        self.level
    }

    /// Level most recently produced (`Low` before the first tick).
    pub fn level(&self) -> ClockSignal {
        self.level
    }

    /// Number of edges produced so far.
    pub fn edges(&self) -> u64 {
        self.edges
    }

    /// Number of rising edges produced so far.
    pub fn rising_edges(&self) -> u64 {
        (self.edges + 1) / 2
    }
}
