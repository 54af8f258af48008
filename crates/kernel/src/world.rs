use crate::entity::{Building, Entity, Particle, TerrainTile};
use glam::DVec3;
use rand::Rng;
use vectorscape_common::{Color, ParticleConfig, SceneConfig, WorldConfig};

/// The drawable world: static scenery followed by the particle set.
///
/// Entities are stored in one list in draw-merge order (buildings, terrain,
/// particles) so the renderer can sort them together. Nothing is added or
/// removed after construction; only particle positions change.
#[derive(Debug, Clone, Default)]
pub struct World {
    entities: Vec<Entity>,
    /// Index of the first particle in `entities`.
    particle_start: usize,
    particle_bound: f64,
    frame: u64,
}

impl World {
    /// An empty world with no entities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the full scene from config using the given random source.
    ///
    /// Pass a seeded generator for reproducible worlds.
    pub fn generate<R: Rng>(config: &SceneConfig, rng: &mut R) -> Self {
        let mut scenery = generate_buildings(&config.world, rng);
        scenery.extend(generate_terrain(&config.world));
        let particles = generate_particles(&config.particles, rng);
        let world = Self::from_parts(scenery, particles, config.particles.bound);
        tracing::debug!(
            objects = world.object_count(),
            particles = world.particle_count(),
            "generated vector world"
        );
        world
    }

    /// Assemble a world from explicit scenery and particles.
    ///
    /// Particle variants inside `scenery` are treated as static scenery.
    pub fn from_parts(scenery: Vec<Entity>, particles: Vec<Particle>, particle_bound: f64) -> Self {
        let particle_start = scenery.len();
        let mut entities = scenery;
        entities.extend(particles.into_iter().map(Entity::Particle));
        Self {
            entities,
            particle_start,
            particle_bound,
            frame: 0,
        }
    }

    /// All entities in merge order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of static scenery entities (buildings and terrain).
    pub fn object_count(&self) -> usize {
        self.particle_start
    }

    pub fn particle_count(&self) -> usize {
        self.entities.len() - self.particle_start
    }

    pub fn particle_bound(&self) -> f64 {
        self.particle_bound
    }

    /// Number of particle steps taken so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.entities[self.particle_start..]
            .iter()
            .filter_map(|e| match e {
                Entity::Particle(p) => Some(p),
                _ => None,
            })
    }

    /// Advance every particle by its velocity, wrapping at the bound.
    ///
    /// The increment is per call, not scaled by elapsed time.
    pub fn step_particles(&mut self) {
        let bound = self.particle_bound;
        for entity in &mut self.entities[self.particle_start..] {
            if let Entity::Particle(p) = entity {
                p.advance(bound);
            }
        }
        self.frame += 1;
    }
}

/// Buildings at uniform random positions, resting on the ground plane.
pub fn generate_buildings<R: Rng>(config: &WorldConfig, rng: &mut R) -> Vec<Entity> {
    let half = config.half_extent;
    (0..config.building_count)
        .map(|_| {
            let height = rng.random_range(config.building_height.min..=config.building_height.max);
            let width = rng.random_range(config.building_width.min..=config.building_width.max);
            let depth = rng.random_range(config.building_depth.min..=config.building_depth.max);
            let x = rng.random_range(-half..=half);
            let z = rng.random_range(-half..=half);
            let hue = config.hue_base + rng.random_range(0.0..=config.hue_span);
            Entity::Building(Building {
                center: DVec3::new(x, height / 2.0, z),
                width,
                height,
                depth,
                color: Color::hsl(hue, 1.0, 0.5),
            })
        })
        .collect()
}

/// One tile per grid point over `[-half_extent, half_extent]` on x and z,
/// x-major, both ends inclusive.
///
/// A grid larger than `MAX_GENERATED` tiles yields no terrain.
pub fn generate_terrain(config: &WorldConfig) -> Vec<Entity> {
    let Some(side) = config.terrain_side() else {
        tracing::warn!(
            half_extent = config.half_extent,
            spacing = config.terrain_spacing,
            "terrain grid out of range, skipping terrain"
        );
        return Vec::new();
    };
    let half = config.half_extent;
    let mut tiles = Vec::with_capacity(side.checked_mul(side).unwrap_or_default());
    for i in 0..side {
        let x = -half + i as f64 * config.terrain_spacing;
        for j in 0..side {
            let z = -half + j as f64 * config.terrain_spacing;
            tiles.push(Entity::Terrain(TerrainTile {
                position: DVec3::new(x, 0.0, z),
                size: config.terrain_tile_size,
                color: config.terrain_color,
            }));
        }
    }
    tiles
}

/// Particles scattered through the wrap cube with small random velocities.
pub fn generate_particles<R: Rng>(config: &ParticleConfig, rng: &mut R) -> Vec<Particle> {
    let bound = config.bound;
    let vertical = config.vertical_half_extent;
    let speed = config.max_speed;
    (0..config.count)
        .map(|_| Particle {
            position: DVec3::new(
                rng.random_range(-bound..=bound),
                rng.random_range(-vertical..=vertical),
                rng.random_range(-bound..=bound),
            ),
            velocity: DVec3::new(
                rng.random_range(-speed..=speed),
                rng.random_range(-speed..=speed),
                rng.random_range(-speed..=speed),
            ),
            size: rng.random_range(config.size.min..=config.size.max),
            color: config.color,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn seeded(seed: u64) -> Pcg64Mcg {
        Pcg64Mcg::seed_from_u64(seed)
    }

    #[test]
    fn world_starts_empty() {
        let w = World::new();
        assert_eq!(w.entity_count(), 0);
        assert_eq!(w.particle_count(), 0);
        assert_eq!(w.frame(), 0);
    }

    #[test]
    fn default_generation_counts() {
        let w = World::generate(&SceneConfig::default(), &mut seeded(1));
        assert_eq!(w.object_count(), 500 + 21 * 21);
        assert_eq!(w.particle_count(), 200);
        assert_eq!(w.entity_count(), 500 + 441 + 200);
    }

    #[test]
    fn merge_order_is_buildings_terrain_particles() {
        let w = World::generate(&SceneConfig::default(), &mut seeded(2));
        let kinds: Vec<&str> = w.entities().iter().map(Entity::kind).collect();
        assert!(kinds[..500].iter().all(|k| *k == "building"));
        assert!(kinds[500..941].iter().all(|k| *k == "terrain"));
        assert!(kinds[941..].iter().all(|k| *k == "particle"));
    }

    #[test]
    fn same_seed_same_world() {
        let config = SceneConfig::default();
        let a = World::generate(&config, &mut seeded(42));
        let b = World::generate(&config, &mut seeded(42));
        assert_eq!(a.entities(), b.entities());
    }

    #[test]
    fn different_seeds_diverge() {
        let config = SceneConfig::default();
        let a = World::generate(&config, &mut seeded(1));
        let b = World::generate(&config, &mut seeded(2));
        assert_ne!(a.entities(), b.entities());
    }

    #[test]
    fn buildings_rest_on_ground_within_extent() {
        let config = SceneConfig::default();
        for entity in generate_buildings(&config.world, &mut seeded(3)) {
            let Entity::Building(b) = entity else {
                panic!("expected building");
            };
            assert_eq!(b.center.y, b.height / 2.0);
            assert!(b.center.x.abs() <= 1000.0 && b.center.z.abs() <= 1000.0);
            assert!(config.world.building_height.contains(b.height));
            assert!(config.world.building_width.contains(b.width));
            assert!(config.world.building_depth.contains(b.depth));
            match b.color {
                Color::Hsl { h, s, l } => {
                    assert!((180.0..=240.0).contains(&h));
                    assert_eq!((s, l), (1.0, 0.5));
                }
                other => panic!("unexpected building color {other}"),
            }
        }
    }

    #[test]
    fn terrain_covers_grid_inclusive() {
        let tiles = generate_terrain(&WorldConfig::default());
        assert_eq!(tiles.len(), 441);
        assert_eq!(tiles[0].anchor(), DVec3::new(-1000.0, 0.0, -1000.0));
        assert_eq!(tiles[1].anchor(), DVec3::new(-1000.0, 0.0, -900.0));
        assert_eq!(tiles[440].anchor(), DVec3::new(1000.0, 0.0, 1000.0));
        assert!(
            tiles
                .iter()
                .all(|t| t.color() == Color::rgb(0x00, 0xaa, 0x44))
        );
    }

    #[test]
    fn oversized_terrain_grid_yields_no_tiles() {
        let config = WorldConfig {
            terrain_spacing: 0.000001,
            ..WorldConfig::default()
        };
        assert!(generate_terrain(&config).is_empty());
    }

    #[test]
    fn particles_spawn_within_ranges() {
        let config = ParticleConfig::default();
        for p in generate_particles(&config, &mut seeded(4)) {
            assert!(p.position.x.abs() <= 1500.0 && p.position.z.abs() <= 1500.0);
            assert!(p.position.y.abs() <= 250.0);
            assert!(p.velocity.abs().max_element() <= 0.1);
            assert!((1.0..=3.0).contains(&p.size));
        }
    }

    #[test]
    fn step_moves_only_particles() {
        let mut w = World::generate(&SceneConfig::default(), &mut seeded(5));
        let before = w.entities().to_vec();
        w.step_particles();
        assert_eq!(w.frame(), 1);
        assert_eq!(&w.entities()[..w.object_count()], &before[..w.object_count()]);
        let moved = w
            .particles()
            .zip(before[w.object_count()..].iter())
            .filter(|(now, then)| now.position != then.anchor())
            .count();
        assert!(moved > 0);
    }

    #[test]
    fn particles_stay_within_bound_over_many_steps() {
        let mut config = SceneConfig::default();
        config.particles.max_speed = 40.0;
        config.particles.count = 64;
        let mut w = World::generate(&config, &mut seeded(6));
        for _ in 0..2_000 {
            w.step_particles();
            for p in w.particles() {
                assert!(
                    p.position.abs().max_element() <= 1500.0,
                    "particle escaped: {:?}",
                    p.position
                );
            }
        }
    }

    #[test]
    fn static_particles_in_scenery_do_not_move() {
        let p = Particle {
            position: DVec3::ZERO,
            velocity: DVec3::ONE,
            size: 1.0,
            color: Color::rgb(255, 255, 255),
        };
        let mut w = World::from_parts(vec![Entity::Particle(p)], vec![p], 1500.0);
        w.step_particles();
        assert_eq!(w.entities()[0].anchor(), DVec3::ZERO);
        assert_eq!(w.entities()[1].anchor(), DVec3::ONE);
        assert_eq!(w.object_count(), 1);
        assert_eq!(w.particle_count(), 1);
    }
}
