//! Simulation Context.
//!
//! Holds the run-wide configuration and the simulated time counter. One
//! context is built per run and moved into the [`SimulationLoop`], which is
//! the only thing allowed to advance time.
//!
//! [`SimulationLoop`]: crate::sim::SimulationLoop

use crate::common::{Result, SimError, TimeUnit};
use crate::config::{CoverageConfig, GeneralConfig, RandReset};
use crate::dut::DeviceModel;
use crate::sim::coverage::CoverageDatabase;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

const PLUSARG_SEED: &str = "+sim+seed+";
const PLUSARG_RAND_RESET: &str = "+sim+rand+reset+";
const PLUSARG_DEBUG_LEVEL: &str = "+sim+debugi+";
const PLUSARG_DEBUG: &str = "+sim+debug";

/// Run-wide state shared by the harness and the device model.
#[derive(Debug)]
pub struct SimulationContext {
    debug_level: u32,
    rand_reset: RandReset,
    seed: u64,
    rng: ChaCha8Rng,
    time_unit: TimeUnit,
    coverage: Option<CoverageDatabase>,
    command_args: Vec<String>,
    time: u64,
    stop_requested: bool,
}

impl SimulationContext {
    /// Debug level `initialize` would settle on, for setting up logging
    /// before the context exists.
    ///
    /// Malformed values are skipped here; `initialize` still rejects them.
    pub fn startup_debug_level(general: &GeneralConfig, command_args: &[String]) -> u32 {
        command_args.iter().fold(general.debug_level, |level, arg| {
            if let Some(val) = arg.strip_prefix(PLUSARG_DEBUG_LEVEL) {
                val.parse().unwrap_or(level)
            } else if arg == PLUSARG_DEBUG {
                level.max(1)
            } else {
                level
            }
        })
    }

    /// Builds the context for one run.
    ///
    /// `command_args` are kept verbatim for the device model. Arguments of
    /// the form `+sim+seed+N`, `+sim+rand+reset+N`, `+sim+debugi+N` and
    /// `+sim+debug` override the matching `general` settings.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for a recognized plus-argument with a
    /// malformed value.
    pub fn initialize(
        general: &GeneralConfig,
        coverage: &CoverageConfig,
        command_args: Vec<String>,
    ) -> Result<Self> {
        let mut debug_level = general.debug_level;
        let mut rand_reset = general.rand_reset;
        let mut seed = general.seed;

        for arg in &command_args {
            if let Some(val) = arg.strip_prefix(PLUSARG_SEED) {
                seed = parse_plusarg(arg, val)?;
            } else if let Some(val) = arg.strip_prefix(PLUSARG_RAND_RESET) {
                rand_reset = RandReset::try_from(parse_plusarg::<u8>(arg, val)?)?;
            } else if let Some(val) = arg.strip_prefix(PLUSARG_DEBUG_LEVEL) {
                debug_level = parse_plusarg(arg, val)?;
            } else if arg == PLUSARG_DEBUG {
                debug_level = debug_level.max(1);
            }
        }

        let coverage = if coverage.enabled {
            if !cfg!(feature = "coverage") {
                warn!("coverage requested but this build has no coverage support");
            }
            Some(CoverageDatabase::new())
        } else {
            None
        };

        debug!(
            "context initialized: debug_level={} rand_reset={:?} seed={} coverage={}",
            debug_level,
            rand_reset,
            seed,
            coverage.is_some()
        );

        Ok(Self {
            debug_level,
            rand_reset,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            time_unit: general.time_unit,
            coverage,
            command_args,
            time: 0,
            stop_requested: false,
        })
    }

    /// Advances simulated time by one unit.
    pub(crate) fn advance_time(&mut self) {
        self.time += 1;
    }

    /// Reports whether the run has been asked to stop.
    ///
    /// The first time `model` reports finished, the request is latched; it
    /// never clears afterwards, even if the model's indicator drops.
    pub fn has_finished<M: DeviceModel + ?Sized>(&mut self, model: &M) -> bool {
        if !self.stop_requested && model.finished() {
            debug!("{} signalled finish at {}", model.name(), self.time_string());
            self.stop_requested = true;
        }
        self.stop_requested
    }

    /// Whether a stop has been latched, without consulting the model.
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub fn time(&self) -> u64 {
        self.time
    }

    pub fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    /// Current time with its unit suffix, e.g. `42ns`.
    pub fn time_string(&self) -> String {
        format!("{}{}", self.time, self.time_unit)
    }

    pub fn debug_level(&self) -> u32 {
        self.debug_level
    }

    pub fn rand_reset(&self) -> RandReset {
        self.rand_reset
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Arguments forwarded from the command line, in order.
    pub fn command_args(&self) -> &[String] {
        &self.command_args
    }

    /// Returns the remainder of the first forwarded argument that starts
    /// with `+` followed by `prefix`.
    ///
    /// `plusarg("vectors=")` on `+vectors=16` yields `Some("16")`.
    pub fn plusarg(&self, prefix: &str) -> Option<&str> {
        self.command_args
            .iter()
            .filter_map(|arg| arg.strip_prefix('+'))
            .find_map(|arg| arg.strip_prefix(prefix))
    }

    pub fn coverage_enabled(&self) -> bool {
        self.coverage.is_some()
    }

    pub fn coverage(&self) -> Option<&CoverageDatabase> {
        self.coverage.as_ref()
    }

    /// Mutable access for models recording coverage; `None` when disabled.
    pub fn coverage_mut(&mut self) -> Option<&mut CoverageDatabase> {
        self.coverage.as_mut()
    }

    /// Initial value for an undriven register of `width` bits.
    ///
    /// Widths above 64 are clamped to 64.
    pub fn rand_reset_bits(&mut self, width: u32) -> u64 {
        let mask = width_mask(width);
        match self.rand_reset {
            RandReset::Zeros => 0,
            RandReset::Ones => mask,
            RandReset::Random => self.rng.gen::<u64>() & mask,
        }
    }
}

fn width_mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

fn parse_plusarg<T: std::str::FromStr>(arg: &str, val: &str) -> Result<T> {
    val.parse()
        .map_err(|_| SimError::config(format!("malformed plus-argument '{}'", arg)))
}
