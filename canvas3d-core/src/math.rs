/// Vector math primitives shared by every pipeline stage
///
/// All functions are pure and return new values. Rotations are standard
/// right-hand rotation matrices about the world axes, angle in radians.
use nalgebra::{Point3, Rotation3, Vector3};

/// Translate a point by `(dx, dy, dz)`.
pub fn translate(p: &Point3<f64>, dx: f64, dy: f64, dz: f64) -> Point3<f64> {
    p + Vector3::new(dx, dy, dz)
}

pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

/// Right-handed cross product.
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Euclidean distance between two points.
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

pub fn to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

pub fn to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Rotate a point about the X axis by `theta` radians.
pub fn rotate_x(p: &Point3<f64>, theta: f64) -> Point3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), theta) * p
}

/// Rotate a point about the Y axis by `theta` radians.
pub fn rotate_y(p: &Point3<f64>, theta: f64) -> Point3<f64> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), theta) * p
}

/// Rotate a point about the Z axis by `theta` radians.
pub fn rotate_z(p: &Point3<f64>, theta: f64) -> Point3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), theta) * p
}

/// Arithmetic mean of a set of points, `None` when empty.
pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}
