//! Common types shared by the harness, the context and the device models.

/// Error type and result alias.
pub mod error;

/// Clock level and time-unit definitions.
pub mod signal;

pub use error::{Result, SimError};
pub use signal::{ClockSignal, TimeUnit};
