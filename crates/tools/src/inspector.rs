use vectorscape_kernel::{Entity, World};

/// Read-only queries against the world for debugging and CLI output.
pub struct WorldInspector;

impl WorldInspector {
    /// Count entities by kind.
    pub fn summary(world: &World) -> WorldSummary {
        let mut summary = WorldSummary {
            frame: world.frame(),
            ..WorldSummary::default()
        };
        for entity in world.entities() {
            match entity {
                Entity::Building(_) => summary.buildings += 1,
                Entity::Terrain(_) => summary.terrain_tiles += 1,
                Entity::Particle(_) => summary.particles += 1,
            }
        }
        summary
    }

    /// Axis-aligned bounds of every particle position, `None` without particles.
    pub fn particle_bounds(world: &World) -> Option<([f64; 3], [f64; 3])> {
        let mut particles = world.particles();
        let first = particles.next()?.position;
        let (min, max) = particles.fold((first, first), |(lo, hi), p| {
            (lo.min(p.position), hi.max(p.position))
        });
        Some((min.to_array(), max.to_array()))
    }
}

/// Entity counts for the inspector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldSummary {
    pub frame: u64,
    pub buildings: usize,
    pub terrain_tiles: usize,
    pub particles: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: frame={} buildings={} terrain={} particles={}",
            self.frame, self.buildings, self.terrain_tiles, self.particles
        )
    }
}
