//! Device Model Interface.
//!
//! This module defines the capability set the harness needs from a design
//! under test. Anything that can take a clock level, evaluate one time step
//! and report completion can be driven by the [`SimulationLoop`], whether
//! it wraps a compiled HDL model or is a hand-written test double.
//!
//! [`SimulationLoop`]: crate::sim::SimulationLoop

use crate::common::{ClockSignal, Result};
use crate::sim::SimulationContext;

/// Trait for clocked device models.
///
/// The harness never inspects a model beyond these methods. A model is
/// constructed once per run, evaluated once per tick and finalized exactly
/// once after the run stops.
pub trait DeviceModel {
    /// Returns the display name of the model.
    ///
    /// Used for logging.
    fn name(&self) -> &str;

    /// Drives the clock input with `level`.
    ///
    /// Takes effect on the next [`evaluate`](DeviceModel::evaluate).
    fn set_clock(&mut self, level: ClockSignal);

    /// Propagates the current inputs through the design for this time step.
    ///
    /// Models may record coverage through `ctx` and may raise their
    /// finished indicator as a side effect.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the run; typically [`SimError::Assertion`].
    ///
    /// [`SimError::Assertion`]: crate::common::SimError::Assertion
    fn evaluate(&mut self, ctx: &mut SimulationContext) -> Result<()>;

    /// Runs end-of-simulation bookkeeping.
    ///
    /// Called exactly once, after the run stopped. The default does nothing.
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Whether the design has signalled completion.
    fn finished(&self) -> bool;
}

impl<M: DeviceModel + ?Sized> DeviceModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_clock(&mut self, level: ClockSignal) {
        (**self).set_clock(level)
    }

    fn evaluate(&mut self, ctx: &mut SimulationContext) -> Result<()> {
        (**self).evaluate(ctx)
    }

    fn finalize(&mut self) -> Result<()> {
        (**self).finalize()
    }

    fn finished(&self) -> bool {
        (**self).finished()
    }
}
