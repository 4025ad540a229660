//! IEEE-754 doubler.
//!
//! A one-stage stream pipeline that multiplies 64-bit doubles by two with
//! integer logic only: zeros and denormals shift their mantissa, normals
//! bump the exponent, the largest exponent overflows to infinity, and
//! infinities and NaNs pass through unchanged.
//!
//! The model is self-checking. It feeds a fixed operand set through the
//! pipeline, compares each result with the host's floating-point multiply
//! and raises an assertion on the first mismatch. It finishes once every
//! operand has been checked.

use super::DeviceModel;
use crate::common::{ClockSignal, Result, SimError};
use crate::sim::SimulationContext;

const SIGN_MASK: u64 = 1 << 63;
const EXP_MASK: u64 = 0x7ff << 52;
const EXP_MAX: u64 = 0x7ff;

const PLUSARG_VECTORS: &str = "doubler+vectors=";

/// Largest operand count `+doubler+vectors=N` accepts.
pub const MAX_VECTORS: usize = 1 << 20;

/// Operand classes tracked as coverage points.
const CLASSES: [&str; 6] = [
    "doubler.zero",
    "doubler.denormal",
    "doubler.normal",
    "doubler.overflow",
    "doubler.infinity",
    "doubler.nan",
];

/// Computes `2 * x` on the raw bit pattern of a double.
pub fn double_bits(x: u64) -> u64 {
    let sign = x & SIGN_MASK;
    let exp = (x & EXP_MASK) >> 52;
    match exp {
        // The mantissa carry moves a large denormal into exponent 1.
        0 => sign | ((x << 1) & !SIGN_MASK),
        EXP_MAX => x,
        e if e == EXP_MAX - 1 => sign | EXP_MASK,
        _ => x + (1 << 52),
    }
}

fn classify(x: u64) -> &'static str {
    let exp = (x & EXP_MASK) >> 52;
    let mantissa = x & !(SIGN_MASK | EXP_MASK);
    match exp {
        0 if mantissa == 0 => CLASSES[0],
        0 => CLASSES[1],
        EXP_MAX if mantissa == 0 => CLASSES[4],
        EXP_MAX => CLASSES[5],
        e if e == EXP_MAX - 1 => CLASSES[3],
        _ => CLASSES[2],
    }
}

fn default_operands() -> Vec<u64> {
    [
        1.0,
        -1.0,
        0.5,
        -0.5,
        3.25,
        -12.375,
        1e100,
        -1e-100,
        42.0,
        0.0,
        -0.0,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
        f64::MIN_POSITIVE / 2.0,
        5e-324,
        f64::MAX,
        -f64::MAX,
    ]
    .iter()
    .map(|v: &f64| v.to_bits())
    .collect()
}

pub struct Doubler {
    operands: Vec<u64>,
    next: usize,
    clk: ClockSignal,
    prev_clk: ClockSignal,
    out_valid: bool,
    out_operand: u64,
    out_data: u64,
    checked: usize,
    last_time: u64,
}

impl Doubler {
    /// Builds a doubler over the built-in operand set.
    ///
    /// `+doubler+vectors=N` repeats the set cyclically to `N` operands, at
    /// most [`MAX_VECTORS`].
    pub fn new(ctx: &mut SimulationContext) -> Result<Self> {
        let mut operands = default_operands();
        if let Some(val) = ctx.plusarg(PLUSARG_VECTORS) {
            let n: usize = val.parse().map_err(|_| {
                SimError::config(format!("malformed +{}{}", PLUSARG_VECTORS, val))
            })?;
            if n > MAX_VECTORS {
                return Err(SimError::config(format!(
                    "+{}{} exceeds the limit of {} operands",
                    PLUSARG_VECTORS, n, MAX_VECTORS
                )));
            }
            operands = operands.iter().copied().cycle().take(n).collect();
        }
        Ok(Self::with_operands(ctx, operands))
    }

    /// Builds a doubler that checks exactly `operands`.
    pub fn with_operands(ctx: &mut SimulationContext, operands: Vec<u64>) -> Self {
        if let Some(cov) = ctx.coverage_mut() {
            for class in CLASSES {
                cov.declare(class);
            }
        }
        Self {
            operands,
            next: 0,
            clk: ClockSignal::Low,
            prev_clk: ClockSignal::Low,
            out_valid: false,
            out_operand: ctx.rand_reset_bits(64),
            out_data: ctx.rand_reset_bits(64),
            checked: 0,
            last_time: 0,
        }
    }

    /// Number of results compared against the reference so far.
    pub fn checked(&self) -> usize {
        self.checked
    }

    fn check_output(&mut self, ctx: &mut SimulationContext) -> Result<()> {
        let operand = f64::from_bits(self.out_operand);
        let expected = operand * 2.0;
        let got = f64::from_bits(self.out_data);
        let matches = if expected.is_nan() {
            got.is_nan()
        } else {
            expected.to_bits() == self.out_data
        };
        if !matches {
            return Err(SimError::assertion(
                ctx.time(),
                format!(
                    "doubler mismatch for {:e}: expected {:#018x} got {:#018x}",
                    operand,
                    expected.to_bits(),
                    self.out_data
                ),
            ));
        }
        if let Some(cov) = ctx.coverage_mut() {
            cov.hit(classify(self.out_operand));
        }
        self.checked += 1;
        Ok(())
    }
}

impl DeviceModel for Doubler {
    fn name(&self) -> &str {
        "doubler"
    }

    fn set_clock(&mut self, level: ClockSignal) {
        self.clk = level;
    }

    fn evaluate(&mut self, ctx: &mut SimulationContext) -> Result<()> {
        let rising = self.prev_clk.is_low() && self.clk.is_high();
        self.prev_clk = self.clk;
        self.last_time = ctx.time();
        if !rising {
            return Ok(());
        }

        if self.out_valid {
            self.check_output(ctx)?;
        }

        match self.operands.get(self.next) {
            Some(&operand) => {
                self.out_operand = operand;
                self.out_data = double_bits(operand);
                self.out_valid = true;
                self.next += 1;
            }
            None => self.out_valid = false,
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if self.checked != self.operands.len() {
            return Err(SimError::assertion(
                self.last_time,
                format!(
                    "doubler finalized with {} of {} results checked",
                    self.checked,
                    self.operands.len()
                ),
            ));
        }
        Ok(())
    }

    fn finished(&self) -> bool {
        self.checked == self.operands.len()
    }
}
