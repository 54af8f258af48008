//! Painter's-algorithm draw ordering.

use glam::DVec3;
use vectorscape_kernel::{CameraState, Entity};

/// Planar (x/z) distance from the camera to an anchor point; height is ignored.
pub fn depth_key(anchor: DVec3, camera: &CameraState) -> f64 {
    let dx = anchor.x - camera.x;
    let dz = anchor.z - camera.z;
    (dx * dx + dz * dz).sqrt()
}

/// Entities ordered farthest-first by [`depth_key`].
///
/// The sort is stable, so entities at equal distance keep their input order.
pub fn draw_order<'a>(entities: &'a [Entity], camera: &CameraState) -> Vec<&'a Entity> {
    let mut keyed: Vec<(f64, &Entity)> = entities
        .iter()
        .map(|e| (depth_key(e.anchor(), camera), e))
        .collect();
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, e)| e).collect()
}
