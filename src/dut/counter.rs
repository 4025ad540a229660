//! Free-running counter.
//!
//! A `width`-bit register that increments on every rising clock edge and
//! raises its finished indicator after a fixed number of cycles. The
//! register has no reset, so its start value comes from the context's
//! randomization policy.

use super::DeviceModel;
use crate::common::{ClockSignal, Result};
use crate::sim::SimulationContext;

const POINT_EDGE: &str = "counter.rising_edge";
const POINT_WRAP: &str = "counter.wrap";

pub struct Counter {
    mask: u64,
    out: u64,
    clk: ClockSignal,
    prev_clk: ClockSignal,
    cycles: u64,
    finish_after: u64,
}

impl Counter {
    /// Builds a counter that finishes after `finish_after` rising edges.
    pub fn new(ctx: &mut SimulationContext, width: u32, finish_after: u64) -> Self {
        let mask = if width >= 64 {
            u64::MAX
        } else {
            (1u64 << width) - 1
        };
        if let Some(cov) = ctx.coverage_mut() {
            cov.declare(POINT_EDGE);
            cov.declare(POINT_WRAP);
        }
        Self {
            mask,
            out: ctx.rand_reset_bits(width),
            clk: ClockSignal::Low,
            prev_clk: ClockSignal::Low,
            cycles: 0,
            finish_after,
        }
    }

    /// Current register value.
    pub fn value(&self) -> u64 {
        self.out
    }

    /// Rising edges seen so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}

impl DeviceModel for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn set_clock(&mut self, level: ClockSignal) {
        self.clk = level;
    }

    fn evaluate(&mut self, ctx: &mut SimulationContext) -> Result<()> {
        let rising = self.prev_clk.is_low() && self.clk.is_high();
        self.prev_clk = self.clk;
        if !rising || self.finished() {
            return Ok(());
        }

        self.out = self.out.wrapping_add(1) & self.mask;
        self.cycles += 1;
        if let Some(cov) = ctx.coverage_mut() {
            cov.hit(POINT_EDGE);
            if self.out == 0 {
                cov.hit(POINT_WRAP);
            }
        }
        Ok(())
    }

    fn finished(&self) -> bool {
        self.cycles >= self.finish_after
    }
}
