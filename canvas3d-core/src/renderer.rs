/// Frame orchestration: cull, order, project, shade, emit
use nalgebra::Point2;

use crate::camera::Camera;
use crate::depth::sort_far_to_near;
use crate::geometry::Face;
use crate::preprocess::{prepare, PreparedFace};
use crate::projection::{project, Viewport};
use crate::shading::{fill_color, stroke_color, Light};
use crate::surface::DrawingSurface;
use crate::transform::to_camera_space;
use crate::visibility::classify;

/// Per-frame rendering options
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOptions {
    /// Outline only: no back-face culling, no depth sort, no fill.
    pub wireframe: bool,
    /// Faces whose centroid is this far or farther are culled.
    pub horizon: Option<f64>,
    pub light: Option<Light>,
}

impl RenderOptions {
    pub fn wireframe() -> Self {
        Self {
            wireframe: true,
            ..Self::default()
        }
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = Some(horizon);
        self
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.light = Some(light);
        self
    }
}

/// What happened to the world's faces in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub faces: usize,
    pub malformed: usize,
    pub culled: usize,
    pub drawn: usize,
}

/// Render one frame of `world` as seen from `camera`.
///
/// The surface is cleared, then every visible face is emitted as one closed
/// path: stroked always, filled unless in wireframe mode. `world` is only
/// read. Malformed faces are skipped and counted.
pub fn render<S>(world: &[Face], camera: &Camera, surface: &mut S, options: &RenderOptions) -> FrameStats
where
    S: DrawingSurface + ?Sized,
{
    let _span = tracing::debug_span!("render", faces = world.len(), wireframe = options.wireframe).entered();

    let viewport = Viewport::new(surface.width(), surface.height());
    surface.clear_rect(0.0, 0.0, viewport.width, viewport.height);

    let forward = camera.forward_vector();
    let mut stats = FrameStats {
        faces: world.len(),
        ..FrameStats::default()
    };

    let mut visible: Vec<PreparedFace<'_>> = Vec::with_capacity(world.len());
    for (index, face) in world.iter().enumerate() {
        let prepared = match prepare(face, camera) {
            Ok(prepared) => prepared,
            Err(e) => {
                tracing::warn!(index, "skipping face: {e}");
                stats.malformed += 1;
                continue;
            }
        };
        match classify(&prepared, camera, &forward, options.wireframe, options.horizon) {
            Ok(()) => visible.push(prepared),
            Err(reason) => {
                tracing::trace!(index, ?reason, "culled");
                stats.culled += 1;
            }
        }
    }

    if !options.wireframe {
        sort_far_to_near(&mut visible);
    }

    let light = options.light.unwrap_or_default();
    let stroke = stroke_color(options.wireframe);
    for prepared in &visible {
        let points: Vec<Point2<f64>> = prepared
            .face
            .verts
            .iter()
            .map(|v| project(&to_camera_space(v, camera), camera, &viewport))
            .collect();
        surface.set_stroke_style(&stroke);
        draw_face(surface, &points);
        surface.stroke();
        if !options.wireframe {
            surface.set_fill_style(&fill_color(prepared.face, &light, &forward));
            surface.fill();
        }
        stats.drawn += 1;
    }

    tracing::debug!(?stats, "frame done");
    stats
}

fn draw_face<S: DrawingSurface + ?Sized>(surface: &mut S, points: &[Point2<f64>]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    surface.begin_path();
    surface.move_to(first.x, first.y);
    for p in rest {
        surface.line_to(p.x, p.y);
    }
    surface.close_path();
}
