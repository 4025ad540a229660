//! Simulation Loop.
//!
//! The control core of the harness. Each step checks the stop condition
//! first and, while the design keeps running, advances time by one unit,
//! toggles the clock into the model and evaluates it. The first time the
//! model reports finished the loop finalizes the model, writes coverage
//! (in builds with the `coverage` feature) and stops for good.

use crate::common::{ClockSignal, Result, SimError};
use crate::config::{COVERAGE_FILE, DEFAULT_LOG_DIR};
use crate::dut::DeviceModel;
use crate::sim::clock::ClockDriver;
use crate::sim::context::SimulationContext;
use crate::stats::RunStats;
use std::path::{Path, PathBuf};
use tracing::{info, trace};

/// Lifecycle state of a [`SimulationLoop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Ticks are being executed.
    Running,
    /// The model finished and has been finalized. Terminal.
    Stopped,
}

/// Owns the context, the model and the clock for a single run.
pub struct SimulationLoop<M: DeviceModel> {
    context: SimulationContext,
    model: M,
    clock: ClockDriver,
    state: LoopState,
    max_ticks: Option<u64>,
    coverage_path: PathBuf,
    stats: RunStats,
}

impl<M: DeviceModel> SimulationLoop<M> {
    /// Creates a loop in the `Running` state with the clock driven low.
    pub fn new(context: SimulationContext, mut model: M) -> Self {
        let clock = ClockDriver::new();
        model.set_clock(clock.level());
        let stats = RunStats::new(model.name(), context.time_unit());
        Self {
            context,
            model,
            clock,
            state: LoopState::Running,
            max_ticks: None,
            coverage_path: Path::new(DEFAULT_LOG_DIR).join(COVERAGE_FILE),
            stats,
        }
    }

    /// Sets where coverage is written at shutdown.
    pub fn with_coverage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.coverage_path = path.into();
        self
    }

    /// Bounds the number of ticks. `None` leaves the run unbounded.
    pub fn with_max_ticks(mut self, limit: Option<u64>) -> Self {
        self.max_ticks = limit;
        self
    }

    /// Executes one tick, or shuts down if the model has finished.
    ///
    /// Calling `step` after the loop stopped does nothing.
    ///
    /// # Errors
    ///
    /// Errors from the model, from the coverage writer, or
    /// [`SimError::TickLimitExceeded`] once the bound is hit. All are fatal;
    /// the loop makes no attempt to recover.
    pub fn step(&mut self) -> Result<LoopState> {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        if self.context.has_finished(&self.model) {
            self.shutdown()?;
            return Ok(LoopState::Stopped);
        }

        if let Some(limit) = self.max_ticks {
            if self.stats.ticks >= limit {
                return Err(SimError::TickLimitExceeded { limit });
            }
        }

        self.context.advance_time();
        let level = self.clock.tick();
        self.model.set_clock(level);
        trace!("t={} clk={}", self.context.time(), level);
        self.model.evaluate(&mut self.context)?;

        self.stats.ticks += 1;
        self.stats.cycles = self.clock.rising_edges();
        self.stats.sim_time = self.context.time();
        Ok(LoopState::Running)
    }

    /// Steps until the model finishes and returns the run statistics.
    pub fn run(&mut self) -> Result<RunStats> {
        info!("simulation of {} started", self.model.name());
        while self.step()? == LoopState::Running {}
        Ok(self.stats.clone())
    }

    fn shutdown(&mut self) -> Result<()> {
        // Terminal even if finalize fails.
        self.state = LoopState::Stopped;
        self.model.finalize()?;

        #[cfg(feature = "coverage")]
        self.write_coverage()?;

        self.stats.finished = true;
        self.stats.stop_timer();
        info!(
            "simulation of {} finished at {} after {} ticks",
            self.model.name(),
            self.context.time_string(),
            self.stats.ticks
        );
        Ok(())
    }

    #[cfg(feature = "coverage")]
    fn write_coverage(&mut self) -> Result<()> {
        if let Some(db) = self.context.coverage() {
            db.persist(&self.coverage_path)?;
            self.stats.coverage_points = db.len();
            self.stats.coverage_covered = db.covered();
        }
        Ok(())
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn context(&self) -> &SimulationContext {
        &self.context
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Level currently driven into the model.
    pub fn clock_level(&self) -> ClockSignal {
        self.clock.level()
    }

    pub fn clock(&self) -> &ClockDriver {
        &self.clock
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn coverage_path(&self) -> &Path {
        &self.coverage_path
    }

    /// Consumes the loop, handing back the context and the model.
    pub fn into_parts(self) -> (SimulationContext, M) {
        (self.context, self.model)
    }
}
