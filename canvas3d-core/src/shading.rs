/// Flat per-face shading
use nalgebra::Vector3;

use crate::color::{Color, Hsl};
use crate::geometry::Face;
use crate::math::dot;

/// Stroke used for every face in wireframe mode.
pub const WIREFRAME_STROKE: &str = "white";
/// Stroke used to outline filled faces.
pub const OUTLINE_STROKE: &str = "black";

/// Directional light
///
/// The floors bound how far saturation and lightness fall for a face seen at
/// a grazing angle: `0` lets it go fully grey/black, `1` disables shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Unit direction the light travels. `None` uses the camera's line of sight.
    pub direction: Option<Vector3<f64>>,
    pub min_saturation: f64,
    pub min_lightness: f64,
}

impl Light {
    /// The direction is normalized; a zero vector gives a headlight.
    pub fn new(direction: Vector3<f64>, min_saturation: f64, min_lightness: f64) -> Self {
        Self {
            direction: direction.try_normalize(1e-12),
            min_saturation: min_saturation.clamp(0.0, 1.0),
            min_lightness: min_lightness.clamp(0.0, 1.0),
        }
    }

    /// A headlight: shines along the camera's line of sight.
    pub fn headlight(min_saturation: f64, min_lightness: f64) -> Self {
        Self::new(Vector3::zeros(), min_saturation, min_lightness)
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::headlight(0.0, 0.0)
    }
}

/// How strongly the face is lit: `0` grazing or facing away, `1` head-on.
pub fn incidence(light_direction: &Vector3<f64>, normal: &Vector3<f64>) -> f64 {
    (-dot(light_direction, normal)).max(0.0)
}

/// Scale saturation and lightness by the incidence, above the light's floors.
pub fn shade(base: &Hsl, angle: f64, light: &Light) -> Hsl {
    Hsl {
        h: base.h,
        s: base.s * (light.min_saturation + (1.0 - light.min_saturation) * angle),
        l: base.l * (light.min_lightness + (1.0 - light.min_lightness) * angle),
    }
}

/// Fill color of a face. Faces with an HSL color and a normal are lit; every
/// other face keeps its color unchanged.
pub fn fill_color(face: &Face, light: &Light, forward: &Vector3<f64>) -> Color {
    match (&face.color, face.normal) {
        (Color::Hsl(base), Some(normal)) => {
            let direction = light.direction.unwrap_or(*forward);
            Color::Hsl(shade(base, incidence(&direction, &normal), light))
        }
        (color, _) => color.clone(),
    }
}

pub fn stroke_color(wireframe: bool) -> Color {
    Color::css(if wireframe { WIREFRAME_STROKE } else { OUTLINE_STROKE })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn facing(normal: Vector3<f64>, color: Color) -> Face {
        Face::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            color,
        )
        .with_normal(normal)
    }

    #[test]
    fn test_incidence() {
        let forward = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(incidence(&forward, &Vector3::new(0.0, -1.0, 0.0)), 1.0);
        assert_eq!(incidence(&forward, &Vector3::new(1.0, 0.0, 0.0)), 0.0);
        assert_eq!(incidence(&forward, &Vector3::new(0.0, 1.0, 0.0)), 0.0);
    }

    #[test]
    fn test_head_on_face_keeps_base_color() {
        let face = facing(-Vector3::y(), Color::hsl(200.0, 80.0, 60.0));
        let color = fill_color(&face, &Light::default(), &Vector3::y());
        assert_eq!(color, Color::hsl(200.0, 80.0, 60.0));
    }

    #[test]
    fn test_grazing_face_drops_to_floor() {
        let face = facing(Vector3::x(), Color::hsl(200.0, 80.0, 60.0));
        let light = Light::new(Vector3::y(), 0.5, 0.25);
        let color = fill_color(&face, &light, &Vector3::z());
        assert_eq!(color, Color::hsl(200.0, 40.0, 15.0));
    }

    #[test]
    fn test_partial_incidence() {
        let light = Light::headlight(0.2, 0.4);
        let shaded = shade(&Hsl::new(10.0, 50.0, 50.0), 0.5, &light);
        assert!((shaded.s - 50.0 * 0.6).abs() < 1e-12);
        assert!((shaded.l - 50.0 * 0.7).abs() < 1e-12);
        assert_eq!(shaded.h, 10.0);
    }

    #[test]
    fn test_explicit_direction_overrides_forward() {
        let face = facing(-Vector3::z(), Color::hsl(0.0, 100.0, 50.0));
        let lit = fill_color(&face, &Light::new(Vector3::z(), 0.0, 0.0), &Vector3::y());
        assert_eq!(lit, Color::hsl(0.0, 100.0, 50.0));
        let headlit = fill_color(&face, &Light::default(), &Vector3::y());
        assert_eq!(headlit, Color::hsl(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_unlit_faces_keep_their_color() {
        let flat = facing(-Vector3::y(), Color::css("#336699"));
        assert_eq!(fill_color(&flat, &Light::default(), &Vector3::y()), Color::css("#336699"));

        let mut no_normal = facing(Vector3::x(), Color::hsl(1.0, 2.0, 3.0));
        no_normal.normal = None;
        assert_eq!(fill_color(&no_normal, &Light::default(), &Vector3::y()), Color::hsl(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_long_light_direction_never_brightens_past_base() {
        let face = facing(-Vector3::y(), Color::hsl(30.0, 80.0, 60.0));
        let light = Light::new(Vector3::new(0.0, 2.0, 0.0), 0.0, 0.0);
        assert_eq!(light.direction, Some(Vector3::y()));
        assert_eq!(fill_color(&face, &light, &Vector3::z()), Color::hsl(30.0, 80.0, 60.0));
    }

    #[test]
    fn test_zero_light_direction_is_a_headlight() {
        let light = Light::new(Vector3::zeros(), 0.3, 0.3);
        assert_eq!(light, Light::headlight(0.3, 0.3));
    }

    #[test]
    fn test_floors_are_clamped() {
        let light = Light::new(Vector3::y(), -1.0, 3.0);
        assert_eq!(light.min_saturation, 0.0);
        assert_eq!(light.min_lightness, 1.0);
    }

    #[test]
    fn test_stroke_colors() {
        assert_eq!(stroke_color(true), Color::css("white"));
        assert_eq!(stroke_color(false), Color::css("black"));
    }
}
