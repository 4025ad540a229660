//! Clock Levels and Time Units.
//!
//! The harness drives a single one-bit clock into the device model. These
//! types keep that level and the unit of the simulated time counter
//! explicit instead of passing bare booleans and integers around.

use serde::Deserialize;
use std::fmt;
use std::ops::Not;

/// Logic level of the clock input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClockSignal {
    /// Logical low (0). The clock starts here.
    #[default]
    Low,
    /// Logical high (1).
    High,
}

impl ClockSignal {
    /// Returns `true` for `High`.
    pub fn is_high(self) -> bool {
        self == ClockSignal::High
    }

    /// Returns `true` for `Low`.
    pub fn is_low(self) -> bool {
        self == ClockSignal::Low
    }
}

impl Not for ClockSignal {
    type Output = ClockSignal;

    fn not(self) -> ClockSignal {
        match self {
            ClockSignal::Low => ClockSignal::High,
            ClockSignal::High => ClockSignal::Low,
        }
    }
}

impl From<bool> for ClockSignal {
    fn from(level: bool) -> Self {
        if level {
            ClockSignal::High
        } else {
            ClockSignal::Low
        }
    }
}

impl From<ClockSignal> for bool {
    fn from(level: ClockSignal) -> bool {
        level.is_high()
    }
}

impl fmt::Display for ClockSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_high() { "1" } else { "0" })
    }
}

/// Unit of one simulated time step.
///
/// Only affects how time is reported; the counter itself is unitless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    S,
    Ms,
    Us,
    #[default]
    Ns,
    Ps,
    Fs,
}

impl TimeUnit {
    /// Short suffix used when printing times.
    pub fn suffix(self) -> &'static str {
        match self {
            TimeUnit::S => "s",
            TimeUnit::Ms => "ms",
            TimeUnit::Us => "us",
            TimeUnit::Ns => "ns",
            TimeUnit::Ps => "ps",
            TimeUnit::Fs => "fs",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
