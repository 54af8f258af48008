//! Developer Tooling: frame-rate accounting, diagnostics reporting, world inspection.
//!
//! # Invariants
//! - Diagnostics are observational; nothing in the core depends on a sink existing.

mod diagnostics;
mod inspector;

pub use diagnostics::{DiagnosticsSink, FpsCounter, FrameReport, TracingSink};
pub use inspector::{WorldInspector, WorldSummary};

/// Crate name and version, for `info` output.
pub fn crate_info() -> &'static str {
    concat!("vectorscape-tools v", env!("CARGO_PKG_VERSION"))
}
