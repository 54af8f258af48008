//! Scene configuration: every tunable constant of the vector world.
//!
//! All sections carry `#[serde(default)]` so a file only needs the keys it
//! overrides. Files are YAML (`.yaml`/`.yml`) or JSON (`.json`).

use crate::types::{Color, Viewport};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension {0:?} (expected yaml, yml or json)")]
    UnsupportedFormat(String),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Upper bound on generated terrain tiles, buildings and particles.
pub const MAX_GENERATED: usize = 1 << 20;

/// Inclusive `[min, max]` range used for randomized dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Upper bounds for the drawing surface; host sizes are clamped to these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_width: 1440,
            max_height: 900,
        }
    }
}

impl CanvasConfig {
    pub fn fit(&self, width: u32, height: u32) -> Viewport {
        Viewport::clamped(width, height, self.max_width, self.max_height)
    }
}

/// Per-frame camera increments. Motion is frame-count based, not time based.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub move_speed: f64,
    /// Radians added to yaw every frame while auto-rotate is on.
    pub rotation_speed: f64,
    pub auto_rotate: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            rotation_speed: 0.005,
            auto_rotate: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Perspective strength; larger values flatten perspective.
    pub fov: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self { fov: 800.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Opacity of the black rectangle laid over the previous frame.
    pub fade_alpha: f64,
    pub line_width: f64,
    pub terrain_min_scale: f64,
    pub particle_min_scale: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fade_alpha: 0.1,
            line_width: 1.0,
            terrain_min_scale: 0.1,
            particle_min_scale: 0.05,
        }
    }
}

/// Static scenery: randomized buildings plus a regular terrain grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub building_count: usize,
    /// Buildings and terrain span `[-half_extent, half_extent]` on x and z.
    pub half_extent: f64,
    pub terrain_spacing: f64,
    pub terrain_tile_size: f64,
    pub terrain_color: Color,
    pub building_height: ValueRange,
    pub building_width: ValueRange,
    pub building_depth: ValueRange,
    /// Building hues are drawn from `[hue_base, hue_base + hue_span]`.
    pub hue_base: f64,
    pub hue_span: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            building_count: 500,
            half_extent: 1000.0,
            terrain_spacing: 100.0,
            terrain_tile_size: 100.0,
            terrain_color: Color::rgb(0x00, 0xaa, 0x44),
            building_height: ValueRange::new(50.0, 250.0),
            building_width: ValueRange::new(30.0, 100.0),
            building_depth: ValueRange::new(30.0, 100.0),
            hue_base: 180.0,
            hue_span: 60.0,
        }
    }
}

impl WorldConfig {
    /// Tiles along one side of the terrain grid, `None` when the grid is
    /// empty or would hold more than [`MAX_GENERATED`] tiles.
    pub fn terrain_side(&self) -> Option<usize> {
        let side = (2.0 * self.half_extent / self.terrain_spacing + 1e-9).floor() + 1.0;
        if !side.is_finite() || side < 1.0 || side * side > MAX_GENERATED as f64 {
            return None;
        }
        Some(side as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Particles wrap at `±bound` on every axis and spawn within it on x/z.
    pub bound: f64,
    pub vertical_half_extent: f64,
    /// Velocity components are drawn from `[-max_speed, max_speed]` per frame.
    pub max_speed: f64,
    pub size: ValueRange,
    pub color: Color,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 200,
            bound: 1500.0,
            vertical_half_extent: 250.0,
            max_speed: 0.1,
            size: ValueRange::new(1.0, 3.0),
            color: Color::rgb(255, 255, 255),
        }
    }
}

/// Complete scene configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub canvas: CanvasConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub render: RenderConfig,
    pub world: WorldConfig,
    pub particles: ParticleConfig,
}

impl SceneConfig {
    /// Load and validate a config file, picking the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let config = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            "json" => Self::from_json_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };
        tracing::debug!(path = %path.display(), "loaded scene config");
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Initial viewport before any resize notification arrives.
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(self.canvas.max_width.max(1), self.canvas.max_height.max(1))
    }

    /// Check every constant the engine divides by, ranges over, or wraps at.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.max_width == 0 || self.canvas.max_height == 0 {
            return Err(invalid("canvas", "dimensions must be non-zero"));
        }
        positive("projection.fov", self.projection.fov)?;
        finite("camera.move_speed", self.camera.move_speed)?;
        finite("camera.rotation_speed", self.camera.rotation_speed)?;
        non_negative("render.line_width", self.render.line_width)?;
        finite("render.terrain_min_scale", self.render.terrain_min_scale)?;
        finite("render.particle_min_scale", self.render.particle_min_scale)?;
        if !(0.0..=1.0).contains(&self.render.fade_alpha) {
            return Err(invalid("render.fade_alpha", "must be within [0, 1]"));
        }
        positive("world.half_extent", self.world.half_extent)?;
        positive("world.terrain_spacing", self.world.terrain_spacing)?;
        if self.world.terrain_side().is_none() {
            return Err(ConfigError::Invalid {
                field: "world.terrain_spacing",
                reason: format!("terrain grid exceeds {MAX_GENERATED} tiles"),
            });
        }
        non_negative("world.terrain_tile_size", self.world.terrain_tile_size)?;
        finite("world.hue_base", self.world.hue_base)?;
        non_negative("world.hue_span", self.world.hue_span)?;
        at_most("world.building_count", self.world.building_count)?;
        at_most("particles.count", self.particles.count)?;
        range("world.building_height", self.world.building_height)?;
        range("world.building_width", self.world.building_width)?;
        range("world.building_depth", self.world.building_depth)?;
        positive("particles.bound", self.particles.bound)?;
        finite("particles.vertical_half_extent", self.particles.vertical_half_extent)?;
        if self.particles.vertical_half_extent < 0.0
            || self.particles.vertical_half_extent > self.particles.bound
        {
            return Err(invalid(
                "particles.vertical_half_extent",
                "must be within [0, particles.bound]",
            ));
        }
        non_negative("particles.max_speed", self.particles.max_speed)?;
        range("particles.size", self.particles.size)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, "must be finite"))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must not be negative"))
    }
}

fn at_most(field: &'static str, count: usize) -> Result<(), ConfigError> {
    if count <= MAX_GENERATED {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{count} exceeds {MAX_GENERATED}"),
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn range(field: &'static str, r: ValueRange) -> Result<(), ConfigError> {
    finite(field, r.min)?;
    finite(field, r.max)?;
    if r.min <= r.max {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("min {} exceeds max {}", r.min, r.max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_vector_demo() {
        let c = SceneConfig::default();
        assert_eq!(c.canvas.max_width, 1440);
        assert_eq!(c.canvas.max_height, 900);
        assert_eq!(c.projection.fov, 800.0);
        assert_eq!(c.render.fade_alpha, 0.1);
        assert_eq!(c.render.terrain_min_scale, 0.1);
        assert_eq!(c.render.particle_min_scale, 0.05);
        assert_eq!(c.world.building_count, 500);
        assert_eq!(c.particles.count, 200);
        assert_eq!(c.particles.bound, 1500.0);
        assert!(c.camera.auto_rotate);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let c = SceneConfig::from_yaml_str("projection:\n  fov: 400\nparticles:\n  count: 10\n")
            .unwrap();
        assert_eq!(c.projection.fov, 400.0);
        assert_eq!(c.particles.count, 10);
        assert_eq!(c.particles.bound, 1500.0);
        assert_eq!(c.world, WorldConfig::default());
    }

    #[test]
    fn json_colors_parse() {
        let c = SceneConfig::from_json_str(r##"{"world": {"terrain_color": "#123456"}}"##).unwrap();
        assert_eq!(c.world.terrain_color, Color::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn rejects_non_positive_fov() {
        let err = SceneConfig::from_yaml_str("projection:\n  fov: 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "projection.fov",
                ..
            }
        ));
    }

    #[test]
    fn rejects_inverted_range() {
        let mut c = SceneConfig::default();
        c.world.building_height = ValueRange::new(300.0, 10.0);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid {
                field: "world.building_height",
                ..
            })
        ));
    }

    #[test]
    fn rejects_fade_alpha_out_of_range() {
        let mut c = SceneConfig::default();
        c.render.fade_alpha = 1.5;
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_oversized_terrain_grid() {
        let err = SceneConfig::from_yaml_str("world:\n  terrain_spacing: 0.000001\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "world.terrain_spacing",
                ..
            }
        ));
        assert_eq!(WorldConfig::default().terrain_side(), Some(21));
    }

    #[test]
    fn rejects_oversized_counts() {
        let mut c = SceneConfig::default();
        c.particles.count = MAX_GENERATED + 1;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid {
                field: "particles.count",
                ..
            })
        ));
    }

    #[test]
    fn rejects_negative_stroke_and_tile_sizes() {
        let err = SceneConfig::from_yaml_str("render:\n  line_width: -1\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "render.line_width",
                ..
            }
        ));
        let mut c = SceneConfig::default();
        c.world.terrain_tile_size = -5.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid {
                field: "world.terrain_tile_size",
                ..
            })
        ));
        c.world.terrain_tile_size = 0.0;
        c.render.line_width = 0.0;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_color_string() {
        let err = SceneConfig::from_yaml_str("particles:\n  color: purple\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "camera:\n  move_speed: 5\n  auto_rotate: false").unwrap();
        let c = SceneConfig::load(file.path()).unwrap();
        assert_eq!(c.camera.move_speed, 5.0);
        assert!(!c.camera.auto_rotate);
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            SceneConfig::load(file.path()),
            Err(ConfigError::UnsupportedFormat(ext)) if ext == "toml"
        ));
    }

    #[test]
    fn yaml_round_trip_of_defaults() {
        let text = SceneConfig::default().to_yaml_string().unwrap();
        let back = SceneConfig::from_yaml_str(&text).unwrap();
        assert_eq!(back, SceneConfig::default());
    }

    #[test]
    fn canvas_fit_clamps() {
        let v = CanvasConfig::default().fit(1920, 1080);
        assert_eq!(v, Viewport::new(1440, 900));
    }
}
