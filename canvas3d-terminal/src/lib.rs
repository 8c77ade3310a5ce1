/// Terminal front end for the canvas3d pipeline
use canvas3d_core::{render, Camera, FrameStats, RenderOptions};
use canvas3d_core::{Color, Face};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Point3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;
pub mod stl;

pub use renderer::AsciiCanvas;

/// Degrees turned per key press.
const TURN_STEP: f64 = 5.0;
/// Fraction of the scene radius moved per key press.
const MOVE_STEP: f64 = 0.1;
const FOV_STEP: f64 = 5.0;
const FOV_RANGE: (f64, f64) = (10.0, 170.0);

/// Six-color cube shown when no model is given.
pub fn demo_world() -> Vec<Face> {
    canvas3d_core::cube(
        2.0,
        [0.0, 180.0, 120.0, 300.0, 240.0, 60.0].map(|h| Color::hsl(h, 70.0, 55.0)),
    )
}

/// Centre and radius of the sphere around every vertex in the world.
pub fn bounds(world: &[Face]) -> Option<(Point3<f64>, f64)> {
    let verts: Vec<Point3<f64>> = world.iter().flat_map(|f| f.verts.iter().copied()).collect();
    let centre = canvas3d_core::math::centroid(&verts)?;
    let radius = verts
        .iter()
        .map(|v| nalgebra::distance(v, &centre))
        .fold(0.0, f64::max);
    Some((centre, radius))
}

/// Camera placed in front of the world (on its -y side), looking along +y
/// with the whole model inside the field of view.
pub fn viewing_camera(world: &[Face], fov: f64) -> Camera {
    let (centre, radius) = bounds(world).unwrap_or((Point3::origin(), 1.0));
    let radius = radius.max(1e-3);
    let half_fov = (fov.clamp(FOV_RANGE.0, FOV_RANGE.1) / 2.0).to_radians();
    let distance = radius / half_fov.sin() * 1.1;
    Camera::new(centre.x, centre.y - distance, centre.z).with_fov(fov)
}

/// Interactive controls applied to the camera and options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub camera: Camera,
    pub options: RenderOptions,
    /// Distance moved per key press.
    pub step: f64,
}

impl Controls {
    pub fn new(camera: Camera, options: RenderOptions, scene_radius: f64) -> Self {
        Self {
            camera,
            options,
            step: (scene_radius * MOVE_STEP).max(1e-3),
        }
    }

    /// Apply one key press. Returns `false` when the key asks to quit.
    pub fn apply_key(&mut self, code: KeyCode) -> bool {
        let cam = &mut self.camera;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Left => cam.turn(-TURN_STEP, 0.0, 0.0),
            KeyCode::Right => cam.turn(TURN_STEP, 0.0, 0.0),
            KeyCode::Up => cam.turn(0.0, TURN_STEP, 0.0),
            KeyCode::Down => cam.turn(0.0, -TURN_STEP, 0.0),
            KeyCode::Char('e') => cam.turn(0.0, 0.0, TURN_STEP),
            KeyCode::Char('r') => cam.turn(0.0, 0.0, -TURN_STEP),
            KeyCode::Char('w') => cam.advance(self.step),
            KeyCode::Char('s') => cam.advance(-self.step),
            KeyCode::Char('a') => cam.strafe(-self.step),
            KeyCode::Char('d') => cam.strafe(self.step),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                cam.fov = (cam.fov - FOV_STEP).max(FOV_RANGE.0);
            }
            KeyCode::Char('-') => {
                cam.fov = (cam.fov + FOV_STEP).min(FOV_RANGE.1);
            }
            KeyCode::Char('f') => self.options.wireframe = !self.options.wireframe,
            _ => {}
        }
        true
    }
}

/// Raw mode on the alternate screen for as long as the guard lives. Dropping
/// it restores the terminal, also when the frame loop panics.
struct ScreenGuard<W: Write> {
    out: W,
}

impl<W: Write> ScreenGuard<W> {
    fn enter(mut out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(out, terminal::EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { out })
    }
}

impl<W: Write> Drop for ScreenGuard<W> {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.out, terminal::LeaveAlternateScreen, cursor::Show);
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    world: Vec<Face>,
    controls: Controls,
    canvas: AsciiCanvas,
    stats: FrameStats,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(world: Vec<Face>, controls: Controls) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            world,
            controls,
            canvas: AsciiCanvas::new(width as usize, height as usize),
            stats: FrameStats::default(),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        let _screen = ScreenGuard::enter(stdout())?;
        self.main_loop()
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                if !self.controls.apply_key(code) {
                    self.running = false;
                }
            }
            Event::Resize(width, height) => {
                tracing::debug!(width, height, "terminal resized");
                self.canvas = AsciiCanvas::new(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let Controls { camera, options, .. } = self.controls;
        self.stats = render(&self.world, &camera, &mut self.canvas, &options);

        let mut stdout = stdout();
        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "canvas3d | FPS: {:.1} | drawn {}/{} | yaw {:.0} pitch {:.0} roll {:.0} fov {:.0}{} | arrows/WASD/E/R move, F wireframe, Q quit",
                self.fps,
                self.stats.drawn,
                self.stats.faces,
                camera.yaw,
                camera.pitch,
                camera.roll,
                camera.fov,
                if options.wireframe { " | wireframe" } else { "" },
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas3d_core::RecordingSurface;

    #[test]
    fn test_demo_world_is_fully_visible_from_viewing_camera() {
        let world = demo_world();
        let camera = viewing_camera(&world, 90.0);
        let mut surface = RecordingSurface::new(80.0, 80.0);
        let stats = render(&world, &camera, &mut surface, &RenderOptions::wireframe());
        assert_eq!(stats.drawn, 6);
        for path in surface.paths() {
            for (x, y) in path {
                assert!((0.0..=80.0).contains(&x), "x={x}");
                assert!((0.0..=80.0).contains(&y), "y={y}");
            }
        }
    }

    #[test]
    fn test_bounds() {
        let (centre, radius) = bounds(&demo_world()).unwrap();
        assert!(centre.coords.norm() < 1e-12);
        assert!((radius - 3.0_f64.sqrt()).abs() < 1e-12);
        assert!(bounds(&[]).is_none());
    }

    #[test]
    fn test_controls() {
        let mut controls = Controls::new(Camera::default(), RenderOptions::default(), 2.0);
        assert!(controls.apply_key(KeyCode::Right));
        assert_eq!(controls.camera.yaw, TURN_STEP);
        assert!(controls.apply_key(KeyCode::Char('f')));
        assert!(controls.options.wireframe);
        assert!(controls.apply_key(KeyCode::Char('+')));
        assert_eq!(controls.camera.fov, 85.0);

        let before = controls.camera.position;
        controls.apply_key(KeyCode::Char('w'));
        assert!((nalgebra::distance(&before, &controls.camera.position) - 0.2).abs() < 1e-12);

        assert!(!controls.apply_key(KeyCode::Char('q')));
        assert!(!controls.apply_key(KeyCode::Esc));
    }

    #[test]
    fn test_screen_guard_restores_terminal_on_unwind() {
        let mut out = Vec::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _screen = ScreenGuard { out: &mut out };
            panic!("frame loop failed");
        }));
        assert!(result.is_err());

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "{written:?}");
        assert!(written.contains("\x1b[?25h"), "{written:?}");
    }

    #[test]
    fn test_fov_is_bounded() {
        let mut controls = Controls::new(Camera::default().with_fov(168.0), RenderOptions::default(), 1.0);
        controls.apply_key(KeyCode::Char('-'));
        assert_eq!(controls.camera.fov, 170.0);
    }
}
