/// Painter's-algorithm ordering
use crate::preprocess::PreparedFace;

/// Stable sort, farthest face first. Equal distances keep their input order.
pub fn sort_far_to_near(faces: &mut [PreparedFace<'_>]) {
    faces.sort_by(|a, b| b.distance.total_cmp(&a.distance));
}
