/// canvas3d Core Library - Stateless 3D-to-2D rendering pipeline
///
/// Takes a world of planar faces and a camera, culls and orders the faces
/// for painter's-algorithm compositing, projects them with an angular
/// projection and emits path commands to any `DrawingSurface`.

pub mod camera;
pub mod color;
pub mod depth;
pub mod geometry;
pub mod math;
pub mod preprocess;
pub mod projection;
pub mod renderer;
pub mod shading;
pub mod surface;
pub mod transform;
pub mod visibility;

// Re-export commonly used types
pub use camera::Camera;
pub use color::{Color, Hsl};
pub use geometry::{cube, Face, FaceError};
pub use projection::Viewport;
pub use renderer::{render, FrameStats, RenderOptions};
pub use shading::Light;
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
pub use visibility::Culled;
