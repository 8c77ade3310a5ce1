/// Camera-space transform
///
/// Re-expresses world points in a frame whose +y axis is the camera's line
/// of sight, still centred on the camera's position.
use nalgebra::Point3;

use crate::camera::Camera;
use crate::math::{rotate_x, rotate_y, rotate_z, to_rad, translate};

/// One rotation of the camera-space transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraRotation {
    /// Rotate about Z by yaw.
    YawAboutZ,
    /// Rotate about Y by roll.
    RollAboutY,
    /// Rotate about X by minus pitch.
    PitchAboutX,
}

/// Rotations applied between moving the camera to the origin and moving it
/// back. Reordering changes the rendered image.
pub const CAMERA_ROTATION_ORDER: [CameraRotation; 3] = [
    CameraRotation::YawAboutZ,
    CameraRotation::RollAboutY,
    CameraRotation::PitchAboutX,
];

impl CameraRotation {
    pub fn apply(self, p: &Point3<f64>, camera: &Camera) -> Point3<f64> {
        match self {
            CameraRotation::YawAboutZ => rotate_z(p, to_rad(camera.yaw)),
            CameraRotation::RollAboutY => rotate_y(p, to_rad(camera.roll)),
            // The view rotation undoes the camera's tilt toward +z
            CameraRotation::PitchAboutX => rotate_x(p, -to_rad(camera.pitch)),
        }
    }
}

/// Transform a world point into the camera-aligned frame.
pub fn to_camera_space(p: &Point3<f64>, camera: &Camera) -> Point3<f64> {
    let c = camera.position;
    let centred = translate(p, -c.x, -c.y, -c.z);
    let rotated = CAMERA_ROTATION_ORDER
        .iter()
        .fold(centred, |acc, step| step.apply(&acc, camera));
    translate(&rotated, c.x, c.y, c.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn test_rotation_order() {
        assert_eq!(
            CAMERA_ROTATION_ORDER,
            [
                CameraRotation::YawAboutZ,
                CameraRotation::RollAboutY,
                CameraRotation::PitchAboutX
            ]
        );
    }

    #[test]
    fn test_identity_pose() {
        let cam = Camera::new(3.0, -2.0, 1.0);
        let p = Point3::new(0.5, 4.0, -7.0);
        assert!((to_camera_space(&p, &cam) - p).norm() < 1e-12);
    }

    #[test]
    fn test_line_of_sight_maps_to_plus_y() {
        // Roll comes before pitch, so only one of them may be non-zero here
        for &(yaw, pitch, roll) in &[
            (0.0, 0.0, 0.0),
            (90.0, 0.0, 0.0),
            (-135.0, 20.0, 0.0),
            (33.0, -61.0, 0.0),
            (210.0, 0.0, 135.0),
        ] {
            let cam = Camera::new(1.0, 2.0, 3.0).with_orientation(yaw, pitch, roll);
            let ahead = cam.position + cam.forward_vector() * 4.0;
            let aligned = to_camera_space(&ahead, &cam);
            assert!(
                (aligned - (cam.position + Vector3::new(0.0, 4.0, 0.0))).norm() < 1e-9,
                "yaw={yaw} pitch={pitch} roll={roll}: {aligned:?}"
            );
        }
    }

    #[test]
    fn test_camera_position_is_fixed() {
        let cam = Camera::new(1.0, 2.0, 3.0).with_orientation(12.0, 34.0, 56.0);
        assert!((to_camera_space(&cam.position, &cam) - cam.position).norm() < 1e-12);
    }

    #[test]
    fn test_right_maps_to_plus_x() {
        let cam = Camera::new(0.0, 0.0, 0.0).with_orientation(70.0, 0.0, 0.0);
        let right = Point3::from(cam.right_vector());
        let aligned = to_camera_space(&right, &cam);
        assert!((aligned - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_order_matters() {
        let cam = Camera::new(0.0, 0.0, 0.0).with_orientation(40.0, 30.0, 20.0);
        let p = Point3::new(1.0, 2.0, 3.0);
        let reversed = CAMERA_ROTATION_ORDER
            .iter()
            .rev()
            .fold(p, |acc, step| step.apply(&acc, &cam));
        assert!((to_camera_space(&p, &cam) - reversed).norm() > 1e-3);
    }
}
