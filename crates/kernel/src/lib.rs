//! World Kernel: camera state, drawable entities, world generation, particle stepping.
//!
//! # Invariants
//! - Entities are created once; none are added or removed afterwards.
//! - Only particles move, by a fixed per-frame increment.
//! - Particle positions stay within `[-bound, bound]` on every axis.

pub mod camera;
pub mod entity;
pub mod world;

pub use camera::CameraState;
pub use entity::{Building, Entity, Particle, TerrainTile};
pub use world::World;

/// Crate name and version, for `info` output.
pub fn crate_info() -> &'static str {
    concat!("vectorscape-kernel v", env!("CARGO_PKG_VERSION"))
}
