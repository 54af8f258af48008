//! Rendering: hand-written 3D-to-2D projection and depth-sorted wireframe drawing.
//!
//! # Invariants
//! - Renderer never mutates world state or the camera.
//! - Draw order is farthest-first by planar distance; ties keep input order.
//! - Projection never fails; degenerate scales are filtered by visibility checks.
//!
//! The drawing target is the [`Surface`] trait. [`RecordingSurface`] captures
//! draw calls for inspection; [`PixmapSurface`] rasterizes with tiny-skia.

pub mod pipeline;
pub mod projector;
mod raster;
mod renderer;
pub mod surface;

pub use pipeline::{depth_key, draw_order};
pub use projector::{Projection, Projector, project};
pub use raster::PixmapSurface;
pub use renderer::{FrameStats, WireframeRenderer};
pub use surface::{DrawCommand, RecordingSurface, Surface};

/// Errors from raster surfaces.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSurfaceSize { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Png(String),
}

/// Crate name and version, for `info` output.
pub fn crate_info() -> &'static str {
    concat!("vectorscape-render v", env!("CARGO_PKG_VERSION"))
}
