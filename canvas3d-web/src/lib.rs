/// canvas3d Web - renders into an HTML5 canvas from WASM
///
/// `CanvasSurface` adapts a `CanvasRenderingContext2d` to the pipeline's
/// drawing-surface contract; `WebRenderer` is the JavaScript-facing handle.
use canvas3d_core::{cube, render, Camera, Color, DrawingSurface, Face, Light, RenderOptions};
use nalgebra::{Point3, Vector3};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Drawing surface backed by a 2D canvas context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }
}

impl DrawingSurface for CanvasSurface {
    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn set_stroke_style(&mut self, color: &Color) {
        self.ctx.set_stroke_style_str(&color.to_string());
    }

    fn set_fill_style(&mut self, color: &Color) {
        self.ctx.set_fill_style_str(&color.to_string());
    }
}

/// Scene, camera and options for one canvas
#[wasm_bindgen]
pub struct WebRenderer {
    surface: CanvasSurface,
    world: Vec<Face>,
    camera: Camera,
    options: RenderOptions,
    last_malformed: usize,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the `<canvas>` element with the given id. Starts with a
    /// demo cube in view.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
            .dyn_into::<HtmlCanvasElement>()?;

        Ok(WebRenderer {
            surface: CanvasSurface::new(canvas)?,
            world: cube(
                2.0,
                [0.0, 180.0, 120.0, 300.0, 240.0, 60.0].map(|h| Color::hsl(h, 70.0, 55.0)),
            ),
            camera: Camera::new(2.5, -6.0, 2.0).with_orientation(-20.0, -15.0, 0.0),
            options: RenderOptions::default(),
            last_malformed: 0,
        })
    }

    /// Remove every face from the scene.
    pub fn clear_world(&mut self) {
        self.world.clear();
    }

    /// Add a polygon. `coords` holds x,y,z triples; `normal` is optional
    /// and must hold exactly three values when given.
    pub fn add_face(&mut self, coords: &[f64], normal: Option<Vec<f64>>, color: &str) -> Result<(), JsValue> {
        self.world.push(build_face(coords, normal, Color::css(color))?);
        Ok(())
    }

    /// Add a polygon with an HSL color, eligible for lighting.
    pub fn add_face_hsl(&mut self, coords: &[f64], normal: Option<Vec<f64>>, h: f64, s: f64, l: f64) -> Result<(), JsValue> {
        self.world.push(build_face(coords, normal, Color::hsl(h, s, l))?);
        Ok(())
    }

    pub fn set_camera(&mut self, x: f64, y: f64, z: f64, yaw: f64, pitch: f64, roll: f64, fov: f64) {
        self.camera = Camera::new(x, y, z).with_orientation(yaw, pitch, roll).with_fov(fov);
    }

    /// Turn the camera by the given degrees.
    pub fn turn(&mut self, d_yaw: f64, d_pitch: f64, d_roll: f64) {
        self.camera.turn(d_yaw, d_pitch, d_roll);
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.options.wireframe = wireframe;
    }

    pub fn set_horizon(&mut self, horizon: Option<f64>) {
        self.options.horizon = horizon;
    }

    pub fn set_light(&mut self, dx: f64, dy: f64, dz: f64, min_saturation: f64, min_lightness: f64) {
        self.options.light = Some(Light::new(Vector3::new(dx, dy, dz), min_saturation, min_lightness));
    }

    pub fn clear_light(&mut self) {
        self.options.light = None;
    }

    /// Draw one frame. Returns the number of faces drawn; malformed faces
    /// are skipped and show up in `last_malformed`.
    pub fn render(&mut self) -> usize {
        let stats = render(&self.world, &self.camera, &mut self.surface, &self.options);
        self.last_malformed = stats.malformed;
        stats.drawn
    }

    /// Number of faces skipped as malformed by the last `render`.
    pub fn last_malformed(&self) -> usize {
        self.last_malformed
    }
}

fn build_face(coords: &[f64], normal: Option<Vec<f64>>, color: Color) -> Result<Face, JsValue> {
    if coords.len() % 3 != 0 {
        return Err(JsValue::from_str("coordinates must come in x,y,z triples"));
    }
    let verts = coords
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();
    let face = Face::new(verts, color);
    match normal.as_deref() {
        None => Ok(face),
        Some(&[x, y, z]) => Ok(face.with_normal(Vector3::new(x, y, z))),
        Some(_) => Err(JsValue::from_str("normal must have three components")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_face() {
        let face = build_face(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            Some(vec![0.0, 0.0, 1.0]),
            Color::css("red"),
        )
        .ok()
        .unwrap();
        assert_eq!(face.verts.len(), 3);
        assert_eq!(face.verts[2], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(face.normal, Some(Vector3::new(0.0, 0.0, 1.0)));

        let no_normal = build_face(&[0.0; 9], None, Color::css("red")).ok().unwrap();
        assert_eq!(no_normal.normal, None);
    }
}
