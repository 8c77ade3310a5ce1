/// Visibility culling
///
/// A face survives when it is inside the horizon, faces the camera (filled
/// mode, normal known) and has at least one vertex in front of the camera.
/// The last test is a coarse stand-in for near-plane clipping: a face that
/// straddles the camera plane is kept whole and may project with artifacts.
use nalgebra::Vector3;

use crate::camera::Camera;
use crate::math::dot;
use crate::preprocess::PreparedFace;

/// Which test removed a face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Culled {
    BeyondHorizon,
    BackFacing,
    BehindCamera,
}

/// `distance < horizon`; no horizon means no limit.
pub fn within_horizon(face: &PreparedFace<'_>, horizon: Option<f64>) -> bool {
    horizon.map_or(true, |h| face.distance < h)
}

/// The outward normal points back toward the camera. Faces without a normal
/// or without a camera-to-centroid direction always pass.
pub fn faces_camera(face: &PreparedFace<'_>) -> bool {
    match (face.to_centroid, face.face.normal) {
        (Some(to_centroid), Some(normal)) => dot(&to_centroid, &normal) < 0.0,
        _ => true,
    }
}

/// At least one vertex lies strictly in the camera's forward half-space.
pub fn in_front_of_camera(face: &PreparedFace<'_>, camera: &Camera, forward: &Vector3<f64>) -> bool {
    face.face
        .verts
        .iter()
        .any(|v| dot(&(v - camera.position), forward) > 0.0)
}

/// Run every applicable test, reporting the first that fails.
pub fn classify(
    face: &PreparedFace<'_>,
    camera: &Camera,
    forward: &Vector3<f64>,
    wireframe: bool,
    horizon: Option<f64>,
) -> Result<(), Culled> {
    if !within_horizon(face, horizon) {
        return Err(Culled::BeyondHorizon);
    }
    // Coincident with the camera: nothing meaningful to test against
    if face.to_centroid.is_none() {
        return Ok(());
    }
    if !wireframe && !faces_camera(face) {
        return Err(Culled::BackFacing);
    }
    if !in_front_of_camera(face, camera, forward) {
        return Err(Culled::BehindCamera);
    }
    Ok(())
}
