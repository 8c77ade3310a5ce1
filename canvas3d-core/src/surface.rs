/// 2D drawing surface contract
///
/// The pipeline only issues path and style commands; rasterization and
/// compositing belong to the surface. Call order is the compositing order.
use crate::color::Color;

/// Canvas-like 2D drawing target
pub trait DrawingSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn set_stroke_style(&mut self, color: &Color);
    fn set_fill_style(&mut self, color: &Color);
}

/// One call made against a [`DrawingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    ClosePath,
    Stroke,
    Fill,
    StrokeStyle(Color),
    FillStyle(Color),
}

/// Surface that records every command instead of drawing
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Number of commands matching a predicate.
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    /// Fill styles in the order faces were filled.
    pub fn fill_order(&self) -> Vec<Color> {
        let mut current = None;
        let mut order = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::FillStyle(color) => current = Some(color.clone()),
                DrawCommand::Fill => order.extend(current.clone()),
                _ => {}
            }
        }
        order
    }

    /// The closed paths drawn, as lists of points.
    pub fn paths(&self) -> Vec<Vec<(f64, f64)>> {
        let mut paths = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::BeginPath => current.clear(),
                DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } => current.push((*x, *y)),
                DrawCommand::ClosePath => paths.push(current.clone()),
                _ => {}
            }
        }
        paths
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn set_stroke_style(&mut self, color: &Color) {
        self.commands.push(DrawCommand::StrokeStyle(color.clone()));
    }

    fn set_fill_style(&mut self, color: &Color) {
        self.commands.push(DrawCommand::FillStyle(color.clone()));
    }
}
