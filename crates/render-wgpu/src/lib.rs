//! wgpu presentation backend for the vectorscape engine.
//!
//! The engine rasterizes on the CPU. This crate only uploads the finished
//! RGBA8 frame to a texture and draws it into the window at 1:1 pixel scale,
//! anchored top-left, with black outside the frame.
//!
//! # Invariants
//! - The presenter never reads or mutates simulation state.
//! - One upload and one draw per driver tick.

mod gpu;
mod shaders;

pub use gpu::{FramePresenter, frame_extent};
