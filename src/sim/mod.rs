//! Simulation core: the run context, the clock, coverage collection and
//! the loop that ties them to a device model.

/// Square-wave clock generator.
pub mod clock;

/// Run-wide configuration and simulated time.
pub mod context;

/// Coverage point accumulation and persistence.
pub mod coverage;

/// The tick loop and its shutdown sequence.
pub mod harness;

pub use clock::ClockDriver;
pub use context::SimulationContext;
pub use coverage::CoverageDatabase;
pub use harness::{LoopState, SimulationLoop};
