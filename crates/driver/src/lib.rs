//! Frame Driver: the fixed per-tick sequence over an explicit simulation context.
//!
//! # Invariants
//! - One tick runs timing, input, particle and render steps in that order.
//! - Motion uses per-frame increments; elapsed time only feeds FPS accounting.
//! - At most one tick is scheduled at a time; shutdown cancels it.

mod frame;
mod scheduler;

pub use frame::{DriverState, FrameDriver, SimulationContext};
pub use scheduler::{FixedStepClock, FrameHandle, ManualScheduler, Scheduler};

/// Errors from driving the frame loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("frame loop already started (state: {0})")]
    AlreadyStarted(DriverState),
    #[error("frame loop is not running (state: {0})")]
    NotRunning(DriverState),
}

/// Crate name and version, for `info` output.
pub fn crate_info() -> &'static str {
    concat!("vectorscape-driver v", env!("CARGO_PKG_VERSION"))
}
