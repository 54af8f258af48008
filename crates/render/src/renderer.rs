use crate::pipeline::draw_order;
use crate::projector::{Projection, Projector};
use crate::surface::Surface;
use glam::DVec2;
use vectorscape_common::{ProjectionConfig, RenderConfig, Rgba, SceneConfig, Viewport};
use vectorscape_kernel::entity::{Building, Particle, TerrainTile};
use vectorscape_kernel::{CameraState, Entity, World};

/// Corner indices of the six box faces: front, back, left, right, top, bottom.
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [0, 4, 7, 3],
    [1, 5, 6, 2],
    [0, 1, 5, 4],
    [3, 2, 6, 7],
];

/// Per-frame draw counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub entities: usize,
    pub drawn: usize,
    pub culled: usize,
}

/// Depth-sorted wireframe renderer over any [`Surface`].
///
/// Reads the world and camera, never mutates them. Each frame fades the
/// previous image instead of clearing it, which leaves motion trails.
#[derive(Debug, Clone)]
pub struct WireframeRenderer {
    fov: f64,
    fade: Rgba,
    line_width: f64,
    terrain_min_scale: f64,
    particle_min_scale: f64,
}

impl WireframeRenderer {
    pub fn new(projection: &ProjectionConfig, render: &RenderConfig) -> Self {
        Self {
            fov: projection.fov,
            fade: Rgba::BLACK.with_alpha(render.fade_alpha),
            line_width: render.line_width,
            terrain_min_scale: render.terrain_min_scale,
            particle_min_scale: render.particle_min_scale,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(&config.projection, &config.render)
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }

    /// Fade, depth-sort and draw every entity of the world.
    pub fn render_frame<S: Surface + ?Sized>(
        &self,
        world: &World,
        camera: &CameraState,
        viewport: Viewport,
        surface: &mut S,
    ) -> FrameStats {
        let _span = tracing::trace_span!("render_frame", entities = world.entity_count()).entered();

        self.fade(viewport, surface);

        let projector = Projector::new(camera, viewport, self.fov);
        let mut stats = FrameStats {
            entities: world.entity_count(),
            ..FrameStats::default()
        };
        for entity in draw_order(world.entities(), camera) {
            if self.draw_entity(entity, &projector, surface) {
                stats.drawn += 1;
            } else {
                stats.culled += 1;
            }
        }

        tracing::trace!(drawn = stats.drawn, culled = stats.culled, "frame rendered");
        stats
    }

    /// Composite the translucent black rectangle over the whole canvas.
    pub fn fade<S: Surface + ?Sized>(&self, viewport: Viewport, surface: &mut S) {
        surface.fill_rect(
            DVec2::ZERO,
            DVec2::new(viewport.width as f64, viewport.height as f64),
            self.fade,
        );
    }

    /// Draw one entity; returns false when it was entirely skipped.
    pub fn draw_entity<S: Surface + ?Sized>(
        &self,
        entity: &Entity,
        projector: &Projector,
        surface: &mut S,
    ) -> bool {
        match entity {
            Entity::Building(b) => self.draw_building(b, projector, surface),
            Entity::Terrain(t) => self.draw_terrain(t, projector, surface),
            Entity::Particle(p) => self.draw_particle(p, projector, surface),
        }
    }

    fn draw_building<S: Surface + ?Sized>(
        &self,
        building: &Building,
        projector: &Projector,
        surface: &mut S,
    ) -> bool {
        let projected: [Projection; 8] = building.corners().map(|c| projector.project(c));
        let color = building.color.to_rgba();
        let mut any = false;
        for face in BOX_FACES {
            // A corner at or behind the eye plane has no usable screen position.
            if face.iter().any(|&i| !projected[i].is_in_front()) {
                continue;
            }
            let points = face.map(|i| projected[i].screen);
            surface.stroke_polyline(&points, color, self.line_width);
            any = true;
        }
        any
    }

    fn draw_terrain<S: Surface + ?Sized>(
        &self,
        tile: &TerrainTile,
        projector: &Projector,
        surface: &mut S,
    ) -> bool {
        let p = projector.project(tile.position);
        if !p.is_visible(self.terrain_min_scale) {
            return false;
        }
        surface.stroke_circle(
            p.screen,
            tile.size * p.scale,
            tile.color.to_rgba(),
            self.line_width,
        );
        true
    }

    fn draw_particle<S: Surface + ?Sized>(
        &self,
        particle: &Particle,
        projector: &Projector,
        surface: &mut S,
    ) -> bool {
        let p = projector.project(particle.position);
        if !p.is_visible(self.particle_min_scale) {
            return false;
        }
        surface.fill_circle(p.screen, particle.size * p.scale, particle.color.to_rgba());
        true
    }
}

impl Default for WireframeRenderer {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}
