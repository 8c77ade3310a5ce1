/// Camera model
///
/// Orientation convention (degrees): yaw 0 looks along +y and increasing yaw
/// turns toward +x; pitch 0 is horizontal and positive pitch tilts toward +z.
/// Roll spins the view about the line of sight.
use nalgebra::{Point3, Vector3};

use crate::math::to_rad;

/// Camera pose and field of view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f64>,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
    /// Horizontal field of view in degrees.
    pub fov: f64,
}

impl Camera {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            fov: 90.0,
        }
    }

    pub fn with_orientation(mut self, yaw: f64, pitch: f64, roll: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self.roll = roll;
        self
    }

    pub fn with_fov(mut self, fov: f64) -> Self {
        self.fov = fov;
        self
    }

    /// Unit vector along the line of sight.
    pub fn forward_vector(&self) -> Vector3<f64> {
        let (yaw, pitch) = (to_rad(self.yaw), to_rad(self.pitch));
        Vector3::new(
            yaw.sin() * pitch.cos(),
            yaw.cos() * pitch.cos(),
            pitch.sin(),
        )
    }

    /// Unit vector pointing to the camera's right in the horizontal plane.
    pub fn right_vector(&self) -> Vector3<f64> {
        let yaw = to_rad(self.yaw);
        Vector3::new(yaw.cos(), -yaw.sin(), 0.0)
    }

    /// Move along the line of sight (negative moves backwards).
    pub fn advance(&mut self, amount: f64) {
        self.position += self.forward_vector() * amount;
    }

    /// Move sideways in the horizontal plane (positive moves right).
    pub fn strafe(&mut self, amount: f64) {
        self.position += self.right_vector() * amount;
    }

    /// Add to yaw/pitch/roll, keeping yaw and roll within `[0, 360)` and
    /// pitch within `[-90, 90]`.
    pub fn turn(&mut self, d_yaw: f64, d_pitch: f64, d_roll: f64) {
        self.yaw = (self.yaw + d_yaw).rem_euclid(360.0);
        self.pitch = (self.pitch + d_pitch).clamp(-90.0, 90.0);
        self.roll = (self.roll + d_roll).rem_euclid(360.0);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(0.0, -5.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec(v: Vector3<f64>, expected: Vector3<f64>) {
        assert!((v - expected).norm() < 1e-12, "{v:?} != {expected:?}");
    }

    #[test]
    fn test_forward_vector_convention() {
        let cam = Camera::new(0.0, 0.0, 0.0);
        assert_vec(cam.forward_vector(), Vector3::new(0.0, 1.0, 0.0));
        assert_vec(
            cam.with_orientation(90.0, 0.0, 0.0).forward_vector(),
            Vector3::new(1.0, 0.0, 0.0),
        );
        assert_vec(
            cam.with_orientation(0.0, 90.0, 0.0).forward_vector(),
            Vector3::new(0.0, 0.0, 1.0),
        );
        // Roll never changes where the camera looks
        assert_vec(
            cam.with_orientation(30.0, 10.0, 75.0).forward_vector(),
            cam.with_orientation(30.0, 10.0, 0.0).forward_vector(),
        );
    }

    #[test]
    fn test_forward_vector_is_unit_for_all_poses() {
        let mut yaw = -720.0;
        while yaw <= 720.0 {
            let mut pitch = -180.0;
            while pitch <= 180.0 {
                let cam = Camera::new(1.0, 2.0, 3.0).with_orientation(yaw, pitch, 13.0);
                assert!((cam.forward_vector().norm() - 1.0).abs() < 1e-12);
                pitch += 7.5;
            }
            yaw += 11.25;
        }
    }

    #[test]
    fn test_right_vector_is_perpendicular() {
        let cam = Camera::default().with_orientation(40.0, 25.0, 0.0);
        assert!(cam.right_vector().dot(&cam.forward_vector()).abs() < 1e-12);
        assert_vec(Camera::default().right_vector(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_movement() {
        let mut cam = Camera::new(0.0, 0.0, 0.0);
        cam.advance(2.0);
        cam.strafe(-1.0);
        assert!((cam.position - Point3::new(-1.0, 2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_turn_wraps_and_clamps() {
        let mut cam = Camera::default();
        cam.turn(-10.0, 120.0, 370.0);
        assert!((cam.yaw - 350.0).abs() < 1e-12);
        assert_eq!(cam.pitch, 90.0);
        assert!((cam.roll - 10.0).abs() < 1e-12);
    }
}
