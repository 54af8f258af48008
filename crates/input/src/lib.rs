//! Input: host events mapped to a small set of device-independent actions.
//!
//! # Invariants
//! - The core only sees held movement keys, an auto-rotate toggle and resizes.
//! - A direction stays held while any key bound to it is down.
//! - Key names follow the DOM `KeyboardEvent.key` spelling, matched case-insensitively.

pub mod action;
pub mod bindings;
mod state;

pub use action::{Action, Direction, MoveKey};
pub use bindings::action_for_key;
pub use state::InputState;

/// Crate name and version, for `info` output.
pub fn crate_info() -> &'static str {
    concat!("vectorscape-input v", env!("CARGO_PKG_VERSION"))
}
