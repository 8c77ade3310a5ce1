/// Angular projection to screen space
///
/// Each camera-aligned point is mapped by its yaw and pitch angle away from
/// the line of sight, and the field of view scales degrees to pixels. Results
/// are only meaningful for points ahead of the camera (positive depth).
use nalgebra::{Point2, Point3};

use crate::camera::Camera;
use crate::math::to_deg;

/// Pixel dimensions of the target surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixels per degree of view angle.
    pub fn scale(&self, camera: &Camera) -> f64 {
        self.width / camera.fov
    }
}

/// Yaw and pitch (degrees) of a camera-aligned point off the line of sight.
pub fn view_angles(aligned: &Point3<f64>, camera: &Camera) -> (f64, f64) {
    let rel = aligned - camera.position;
    (to_deg(rel.x.atan2(rel.y)), to_deg(rel.z.atan2(rel.y)))
}

/// Project a camera-aligned point to screen coordinates.
pub fn project(aligned: &Point3<f64>, camera: &Camera, viewport: &Viewport) -> Point2<f64> {
    let (yaw, pitch) = view_angles(aligned, camera);
    let scale = viewport.scale(camera);
    Point2::new(
        viewport.width / 2.0 + yaw * scale,
        viewport.height / 2.0 - pitch * scale,
    )
}
