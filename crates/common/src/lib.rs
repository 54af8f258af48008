//! Shared value types and the scene configuration layer.
//!
//! # Invariants
//! - Configuration is validated once at load time; downstream crates trust it.
//! - Colors are parsed up front so the draw path never handles strings.

pub mod config;
pub mod types;

pub use config::{
    CameraConfig, CanvasConfig, ConfigError, MAX_GENERATED, ParticleConfig, ProjectionConfig,
    RenderConfig, SceneConfig, ValueRange, WorldConfig,
};
pub use types::{Color, ColorParseError, Rgba, Viewport};

/// Crate name and version, for `info` output.
pub fn crate_info() -> &'static str {
    concat!("vectorscape-common v", env!("CARGO_PKG_VERSION"))
}
