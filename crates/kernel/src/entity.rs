use glam::DVec3;
use serde::{Deserialize, Serialize};
use vectorscape_common::Color;

/// Axis-aligned box resting on the ground plane, drawn as a wireframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub center: DVec3,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub color: Color,
}

impl Building {
    /// The eight box corners: indices 0..4 on the near (`-z`) side, 4..8 on the far side.
    pub fn corners(&self) -> [DVec3; 8] {
        let h = DVec3::new(self.width, self.height, self.depth) / 2.0;
        let c = self.center;
        [
            DVec3::new(c.x - h.x, c.y - h.y, c.z - h.z),
            DVec3::new(c.x + h.x, c.y - h.y, c.z - h.z),
            DVec3::new(c.x + h.x, c.y + h.y, c.z - h.z),
            DVec3::new(c.x - h.x, c.y + h.y, c.z - h.z),
            DVec3::new(c.x - h.x, c.y - h.y, c.z + h.z),
            DVec3::new(c.x + h.x, c.y - h.y, c.z + h.z),
            DVec3::new(c.x + h.x, c.y + h.y, c.z + h.z),
            DVec3::new(c.x - h.x, c.y + h.y, c.z + h.z),
        ]
    }
}

/// Ground marker drawn as a circle that shrinks with distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainTile {
    pub position: DVec3,
    pub size: f64,
    pub color: Color,
}

/// Drifting point with a constant per-frame velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec3,
    pub velocity: DVec3,
    pub size: f64,
    pub color: Color,
}

impl Particle {
    /// Integrate one frame and wrap each axis that left `[-bound, bound]`
    /// to the opposite bound.
    pub fn advance(&mut self, bound: f64) {
        self.position += self.velocity;
        self.position = DVec3::new(
            wrap(self.position.x, bound),
            wrap(self.position.y, bound),
            wrap(self.position.z, bound),
        );
    }
}

fn wrap(v: f64, bound: f64) -> f64 {
    if v < -bound {
        bound
    } else if v > bound {
        -bound
    } else {
        v
    }
}

/// Anything the world can draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Building(Building),
    Terrain(TerrainTile),
    Particle(Particle),
}

impl Entity {
    /// Point used for depth sorting.
    pub fn anchor(&self) -> DVec3 {
        match self {
            Self::Building(b) => b.center,
            Self::Terrain(t) => t.position,
            Self::Particle(p) => p.position,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Building(b) => b.color,
            Self::Terrain(t) => t.color,
            Self::Particle(p) => p.color,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Building(_) => "building",
            Self::Terrain(_) => "terrain",
            Self::Particle(_) => "particle",
        }
    }
}

impl From<Building> for Entity {
    fn from(b: Building) -> Self {
        Self::Building(b)
    }
}

impl From<TerrainTile> for Entity {
    fn from(t: TerrainTile) -> Self {
        Self::Terrain(t)
    }
}

impl From<Particle> for Entity {
    fn from(p: Particle) -> Self {
        Self::Particle(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(position: DVec3, velocity: DVec3) -> Particle {
        Particle {
            position,
            velocity,
            size: 1.0,
            color: Color::rgb(255, 255, 255),
        }
    }

    #[test]
    fn building_corners_span_extents() {
        let b = Building {
            center: DVec3::new(0.0, 50.0, 300.0),
            width: 60.0,
            height: 100.0,
            depth: 60.0,
            color: Color::rgb(0, 255, 255),
        };
        let c = b.corners();
        assert_eq!(c[0], DVec3::new(-30.0, 0.0, 270.0));
        assert_eq!(c[6], DVec3::new(30.0, 100.0, 330.0));
        assert_eq!(c[3], DVec3::new(-30.0, 100.0, 270.0));
        assert_eq!(c[5], DVec3::new(30.0, 0.0, 330.0));
    }

    #[test]
    fn particle_moves_by_velocity() {
        let mut p = particle_at(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.1, -0.1, 0.05));
        p.advance(1500.0);
        assert!((p.position - DVec3::new(1.1, 1.9, 3.05)).length() < 1e-12);
    }

    #[test]
    fn particle_wraps_past_positive_bound() {
        let mut p = particle_at(DVec3::new(1499.95, 0.0, 0.0), DVec3::new(0.1, 0.0, 0.0));
        p.advance(1500.0);
        assert_eq!(p.position.x, -1500.0);
    }

    #[test]
    fn particle_wraps_every_axis_both_ways() {
        let mut p = particle_at(
            DVec3::new(-1499.95, 1499.95, -1499.95),
            DVec3::new(-0.1, 0.1, -0.1),
        );
        p.advance(1500.0);
        assert_eq!(p.position, DVec3::new(1500.0, -1500.0, 1500.0));
    }

    #[test]
    fn particle_on_bound_is_not_wrapped() {
        let mut p = particle_at(DVec3::new(1500.0, 0.0, 0.0), DVec3::ZERO);
        p.advance(1500.0);
        assert_eq!(p.position.x, 1500.0);
    }

    #[test]
    fn entity_anchor_per_variant() {
        let tile = TerrainTile {
            position: DVec3::new(100.0, 0.0, -200.0),
            size: 100.0,
            color: Color::rgb(0, 0xaa, 0x44),
        };
        let e: Entity = tile.into();
        assert_eq!(e.anchor(), DVec3::new(100.0, 0.0, -200.0));
        assert_eq!(e.kind(), "terrain");
    }
}
