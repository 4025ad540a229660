//! Device models.
//!
//! The [`DeviceModel`] trait is the harness's view of a design under test.
//! Two self-contained models ship with the crate so the binary can run
//! without an external design.

pub mod counter;
pub mod doubler;
pub mod traits;

pub use counter::Counter;
pub use doubler::Doubler;
pub use traits::DeviceModel;

use crate::common::{Result, SimError};
use crate::config::ModelConfig;
use crate::sim::SimulationContext;

/// Names accepted by [`build`].
pub const MODEL_NAMES: [&str; 2] = ["counter", "doubler"];

/// Constructs the model named in `config`.
///
/// Construction may draw initial register values from `ctx`, so the
/// context must be fully initialized first.
pub fn build(config: &ModelConfig, ctx: &mut SimulationContext) -> Result<Box<dyn DeviceModel>> {
    match config.name.as_str() {
        "counter" => Ok(Box::new(Counter::new(
            ctx,
            config.counter_width,
            config.counter_cycles,
        ))),
        "doubler" => Ok(Box::new(Doubler::new(ctx)?)),
        other => Err(SimError::config(format!(
            "unknown model '{}', expected one of: {}",
            other,
            MODEL_NAMES.join(", ")
        ))),
    }
}
