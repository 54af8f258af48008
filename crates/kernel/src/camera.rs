use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Viewer position plus pitch (`rot_x`) and yaw (`rot_y`) in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rot_x: f64,
    pub rot_y: f64,
}

impl CameraState {
    pub fn at(position: DVec3) -> Self {
        Self {
            x: position.x,
            y: position.y,
            z: position.z,
            ..Self::default()
        }
    }

    pub fn with_rotation(self, rot_x: f64, rot_y: f64) -> Self {
        Self {
            rot_x,
            rot_y,
            ..self
        }
    }

    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Shift the camera by a world-space delta.
    pub fn translate(&mut self, delta: DVec3) {
        self.x += delta.x;
        self.y += delta.y;
        self.z += delta.z;
    }

    pub fn yaw_by(&mut self, radians: f64) {
        self.rot_y += radians;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_at_origin() {
        let cam = CameraState::default();
        assert_eq!(cam.position(), DVec3::ZERO);
        assert_eq!(cam.rot_x, 0.0);
        assert_eq!(cam.rot_y, 0.0);
    }

    #[test]
    fn translate_and_yaw() {
        let mut cam = CameraState::at(DVec3::new(1.0, 2.0, 3.0));
        cam.translate(DVec3::new(0.0, 0.0, -2.0));
        cam.yaw_by(0.005);
        cam.yaw_by(0.005);
        assert_eq!(cam.position(), DVec3::new(1.0, 2.0, 1.0));
        assert!((cam.rot_y - 0.01).abs() < 1e-12);
    }
}
