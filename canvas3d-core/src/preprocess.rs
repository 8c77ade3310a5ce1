/// Per-frame derived face attributes
///
/// Nothing computed here outlives a single `render` call; the camera moves
/// between frames.
use nalgebra::{Point3, Vector3};

use crate::camera::Camera;
use crate::geometry::{Face, FaceError};
use crate::math::{centroid, distance};

/// A face paired with the attributes the later stages need.
#[derive(Debug, Clone)]
pub struct PreparedFace<'a> {
    pub face: &'a Face,
    pub centroid: Point3<f64>,
    pub distance: f64,
    /// Unit vector from the camera to the centroid. `None` when the centroid
    /// coincides with the camera; such faces are always visible.
    pub to_centroid: Option<Vector3<f64>>,
}

/// Compute centroid, camera distance and camera-to-centroid direction.
pub fn prepare<'a>(face: &'a Face, camera: &Camera) -> Result<PreparedFace<'a>, FaceError> {
    face.validate()?;
    let centroid = centroid(&face.verts).ok_or(FaceError::TooFewVertices { found: 0 })?;
    let distance = distance(&camera.position, &centroid);
    let to_centroid = if distance > 0.0 {
        Some((centroid - camera.position) / distance)
    } else {
        None
    };

    Ok(PreparedFace {
        face,
        centroid,
        distance,
        to_centroid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn triangle_at(z: f64) -> Face {
        Face::new(
            vec![
                Point3::new(-1.0, 0.0, z),
                Point3::new(1.0, 0.0, z),
                Point3::new(0.0, 3.0, z),
            ],
            Color::css("red"),
        )
    }

    #[test]
    fn test_prepare() {
        let face = triangle_at(0.0);
        let prepared = prepare(&face, &Camera::new(0.0, 1.0, 4.0)).unwrap();
        assert!((prepared.centroid - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
        assert!((prepared.distance - 4.0).abs() < 1e-12);
        let dir = prepared.to_centroid.unwrap();
        assert!((dir - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_zero_distance_skips_normalization() {
        let face = triangle_at(0.0);
        let prepared = prepare(&face, &Camera::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(prepared.distance, 0.0);
        assert!(prepared.to_centroid.is_none());
    }

    #[test]
    fn test_malformed_face_is_rejected() {
        let face = Face::new(vec![Point3::origin()], Color::css("red"));
        assert!(matches!(
            prepare(&face, &Camera::default()),
            Err(FaceError::TooFewVertices { found: 1 })
        ));
    }
}
