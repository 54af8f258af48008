//! Camera-relative rotation and perspective projection onto the screen.

use glam::{DVec2, DVec3};
use vectorscape_common::Viewport;
use vectorscape_kernel::CameraState;

/// Screen-space result of projecting one world point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub screen: DVec2,
    /// Perspective foreshortening applied to both offset and size.
    /// Non-positive or non-finite when the point is at or behind the eye plane.
    pub scale: f64,
}

impl Projection {
    /// True when the scale is finite and strictly above `min_scale`.
    pub fn is_visible(&self, min_scale: f64) -> bool {
        self.scale.is_finite() && self.scale > min_scale
    }

    /// True when the point lies in front of the camera at all.
    pub fn is_in_front(&self) -> bool {
        self.is_visible(0.0)
    }
}

/// Projection parameters for one frame, with the camera trig precomputed.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    eye: DVec3,
    cos_x: f64,
    sin_x: f64,
    cos_y: f64,
    sin_y: f64,
    fov: f64,
    center: DVec2,
}

impl Projector {
    pub fn new(camera: &CameraState, viewport: Viewport, fov: f64) -> Self {
        Self {
            eye: camera.position(),
            cos_x: camera.rot_x.cos(),
            sin_x: camera.rot_x.sin(),
            cos_y: camera.rot_y.cos(),
            sin_y: camera.rot_y.sin(),
            fov,
            center: DVec2::new(viewport.half_width(), viewport.half_height()),
        }
    }

    pub fn project(&self, point: DVec3) -> Projection {
        let d = point - self.eye;

        // yaw, then pitch
        let x1 = d.x * self.cos_y - d.z * self.sin_y;
        let z1 = d.x * self.sin_y + d.z * self.cos_y;
        let y1 = d.y * self.cos_x - z1 * self.sin_x;
        let z2 = d.y * self.sin_x + z1 * self.cos_x;

        let scale = self.fov / (self.fov + z2);
        Projection {
            screen: DVec2::new(x1 * scale, y1 * scale) + self.center,
            scale,
        }
    }
}

/// Project a single point. Pure; see [`Projector`] for per-frame reuse.
pub fn project(point: DVec3, camera: &CameraState, viewport: Viewport, fov: f64) -> Projection {
    Projector::new(camera, viewport, fov).project(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;
    use std::f64::consts::TAU;

    const FOV: f64 = 800.0;

    fn viewport() -> Viewport {
        Viewport::new(1440, 900)
    }

    fn close(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn camera_position_projects_to_center() {
        let cam = CameraState::at(DVec3::new(12.0, -40.0, 300.0));
        let p = project(cam.position(), &cam, viewport(), FOV);
        assert_eq!(p.scale, 1.0);
        assert_eq!(p.screen, DVec2::new(720.0, 450.0));
    }

    #[test]
    fn yaw_is_periodic() {
        let mut rng = Pcg64Mcg::seed_from_u64(11);
        for _ in 0..500 {
            let point = DVec3::new(
                rng.random_range(-1500.0..1500.0),
                rng.random_range(-300.0..300.0),
                rng.random_range(-1500.0..1500.0),
            );
            let rot_x = rng.random_range(-1.0..1.0);
            let rot_y = rng.random_range(-TAU..TAU);
            let a = project(point, &CameraState::default().with_rotation(rot_x, rot_y), viewport(), FOV);
            let b = project(
                point,
                &CameraState::default().with_rotation(rot_x, rot_y + TAU),
                viewport(),
                FOV,
            );
            if !a.scale.is_finite() || a.scale.abs() > 1e6 {
                continue;
            }
            assert!(close(a.scale, b.scale, 1e-6), "{a:?} vs {b:?}");
            assert!(close(a.screen.x, b.screen.x, 1e-6), "{a:?} vs {b:?}");
            assert!(close(a.screen.y, b.screen.y, 1e-6), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn scale_decreases_with_depth() {
        let cam = CameraState::default();
        let mut previous = f64::INFINITY;
        for step in 0..200 {
            let depth = step as f64 * 50.0;
            let p = project(DVec3::new(0.0, 0.0, depth), &cam, viewport(), FOV);
            assert!(p.scale < previous, "depth {depth}: {} !< {previous}", p.scale);
            assert!(p.scale > 0.0);
            previous = p.scale;
        }
    }

    #[test]
    fn points_ahead_converge_on_center() {
        let cam = CameraState::default();
        let near = project(DVec3::new(100.0, 0.0, 0.0), &cam, viewport(), FOV);
        let far = project(DVec3::new(100.0, 0.0, 8000.0), &cam, viewport(), FOV);
        assert_eq!(near.screen.x, 820.0);
        assert!(far.screen.x > 720.0 && far.screen.x < near.screen.x);
    }

    #[test]
    fn behind_eye_plane_is_degenerate_not_panic() {
        let cam = CameraState::default();
        let on_plane = project(DVec3::new(10.0, 0.0, -FOV), &cam, viewport(), FOV);
        assert!(!on_plane.scale.is_finite());
        assert!(!on_plane.is_in_front());

        let behind = project(DVec3::new(10.0, 0.0, -2.0 * FOV), &cam, viewport(), FOV);
        assert!(behind.scale < 0.0);
        assert!(!behind.is_visible(0.05));
    }

    #[test]
    fn quarter_yaw_swaps_axes() {
        let cam = CameraState::default().with_rotation(0.0, std::f64::consts::FRAC_PI_2);
        // x1 = x cos - z sin = -z; z1 = x sin + z cos = x
        let p = project(DVec3::new(0.0, 0.0, 100.0), &cam, viewport(), FOV);
        assert!(close(p.scale, 1.0, 1e-12));
        assert!(close(p.screen.x, 720.0 - 100.0, 1e-9));
    }

    #[test]
    fn pitch_moves_points_vertically() {
        let cam = CameraState::default().with_rotation(0.1, 0.0);
        let p = project(DVec3::new(0.0, 0.0, 400.0), &cam, viewport(), FOV);
        // y1 = -z * sin(0.1) < 0 so the point rises above center
        assert!(p.screen.y < 450.0);
        assert_eq!(p.screen.x, 720.0);
    }

    #[test]
    fn projector_matches_free_function() {
        let cam = CameraState::at(DVec3::new(5.0, 1.0, -20.0)).with_rotation(0.2, 1.3);
        let projector = Projector::new(&cam, viewport(), FOV);
        let point = DVec3::new(300.0, 20.0, 150.0);
        assert_eq!(projector.project(point), project(point, &cam, viewport(), FOV));
    }
}
