/// Scene geometry: planar polygonal faces
use nalgebra::{Point3, Vector3};
use thiserror::Error;

use crate::color::Color;
use crate::math::cross;

/// Reasons a face cannot be drawn
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FaceError {
    #[error("face has {found} vertices, at least 3 are required")]
    TooFewVertices { found: usize },
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },
}

/// A planar polygon with an optional outward normal
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub verts: Vec<Point3<f64>>,
    /// Outward unit normal. `None` disables back-face culling and lit
    /// shading for this face.
    pub normal: Option<Vector3<f64>>,
    pub color: Color,
}

impl Face {
    pub fn new(verts: Vec<Point3<f64>>, color: Color) -> Self {
        Self {
            verts,
            normal: None,
            color,
        }
    }

    pub fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = Some(normal);
        self
    }

    /// Derive the outward normal from the winding of the first three
    /// vertices (counter-clockwise seen from outside). Leaves the face
    /// unchanged if those vertices are collinear or missing.
    pub fn with_derived_normal(mut self) -> Self {
        if let Some(normal) = winding_normal(&self.verts) {
            self.normal = Some(normal);
        }
        self
    }

    /// Check the face is drawable.
    pub fn validate(&self) -> Result<(), FaceError> {
        if self.verts.len() < 3 {
            return Err(FaceError::TooFewVertices {
                found: self.verts.len(),
            });
        }
        if let Some(index) = self
            .verts
            .iter()
            .position(|v| !v.coords.iter().all(|c| c.is_finite()))
        {
            return Err(FaceError::NonFiniteVertex { index });
        }
        Ok(())
    }
}

/// Unit normal of the plane through the first three points, right-hand rule.
pub fn winding_normal(verts: &[Point3<f64>]) -> Option<Vector3<f64>> {
    let [v0, v1, v2, ..] = verts else {
        return None;
    };
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    cross(&edge1, &edge2).try_normalize(1e-12)
}

/// Axis-aligned cube centred on the origin.
///
/// Faces come out in the order +x, -x, +y, -y, +z, -z, each wound
/// counter-clockwise seen from outside and carrying its outward normal.
/// `colors` is indexed in the same order.
pub fn cube(size: f64, colors: [Color; 6]) -> Vec<Face> {
    let h = size / 2.0;
    let p = |x: f64, y: f64, z: f64| Point3::new(x * h, y * h, z * h);
    let quads = [
        [p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0), p(1.0, -1.0, 1.0)],
        [p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0)],
        [p(-1.0, 1.0, -1.0), p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0)],
        [p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(-1.0, -1.0, 1.0)],
        [p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0)],
        [p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, -1.0, -1.0)],
    ];
    let normals = [
        Vector3::x(),
        -Vector3::x(),
        Vector3::y(),
        -Vector3::y(),
        Vector3::z(),
        -Vector3::z(),
    ];

    quads
        .into_iter()
        .zip(normals)
        .zip(colors)
        .map(|((verts, normal), color)| Face::new(verts.to_vec(), color).with_normal(normal))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_cube() -> Vec<Face> {
        cube(2.0, std::array::from_fn(|_| Color::css("grey")))
    }

    #[test]
    fn test_cube_shape() {
        let faces = grey_cube();
        assert_eq!(faces.len(), 6);
        for face in &faces {
            assert_eq!(face.verts.len(), 4);
            assert!(face.validate().is_ok());
            let normal = face.normal.unwrap();
            // Every vertex lies on the face's outer plane
            for v in &face.verts {
                assert!((v.coords.dot(&normal) - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_cube_winding_matches_normals() {
        for face in grey_cube() {
            let derived = winding_normal(&face.verts).unwrap();
            assert!((derived - face.normal.unwrap()).norm() < 1e-12);
        }
    }

    #[test]
    fn test_derived_normal() {
        let face = Face::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            Color::css("red"),
        )
        .with_derived_normal();
        assert_eq!(face.normal, Some(Vector3::new(0.0, 0.0, 1.0)));

        let collinear = Face::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
            ],
            Color::css("red"),
        )
        .with_derived_normal();
        assert_eq!(collinear.normal, None);
    }

    #[test]
    fn test_validate_rejects_malformed_faces() {
        let line = Face::new(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            Color::css("red"),
        );
        assert_eq!(line.validate(), Err(FaceError::TooFewVertices { found: 2 }));

        let nan = Face::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, f64::NAN, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            Color::css("red"),
        );
        assert_eq!(nan.validate(), Err(FaceError::NonFiniteVertex { index: 1 }));
    }
}
