/// ASCII drawing surface for terminal rendering
///
/// Implements the canvas contract on a grid of character cells. Surface
/// coordinates are square "pixels": one per column horizontally and
/// `CELL_ASPECT` per row vertically, since terminal cells are about twice
/// as tall as they are wide.
use canvas3d_core::{Color, DrawingSurface};
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

/// Character luminosity ramp for fills (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Surface pixels per character row.
pub const CELL_ASPECT: f64 = 2.0;

const FALLBACK_RGB: (u8, u8, u8) = (255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    rgb: Option<(u8, u8, u8)>,
}

const BLANK: Cell = Cell { ch: ' ', rgb: None };

#[derive(Debug, Clone, Default)]
struct SubPath {
    points: Vec<(f64, f64)>,
    closed: bool,
}

/// Character-grid canvas
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    path: Vec<SubPath>,
    stroke_style: Color,
    fill_style: Color,
}

impl AsciiCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![BLANK; cols * rows],
            path: Vec::new(),
            stroke_style: Color::css("black"),
            fill_style: Color::css("black"),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Character at a cell, `None` outside the grid.
    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col].ch)
    }

    /// One text line per row.
    pub fn lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.cols.max(1))
            .take(self.rows)
            .map(|row| row.iter().map(|c| c.ch).collect())
            .collect()
    }

    fn set(&mut self, col: i64, row: i64, cell: Cell) {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            self.cells[row as usize * self.cols + col as usize] = cell;
        }
    }

    fn to_cell(x: f64, y: f64) -> (i64, i64) {
        (x.floor() as i64, (y / CELL_ASPECT).floor() as i64)
    }

    /// Plot a line between two surface points with an edge-shaped glyph.
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), rgb: (u8, u8, u8)) {
        let (dx, dy) = (to.0 - from.0, (to.1 - from.1) / CELL_ASPECT);
        let ch = edge_glyph(dx, dy);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        // Guard against absurd spans from points far off screen
        let steps = steps.min(((self.cols + self.rows) * 4) as f64) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let (col, row) = Self::to_cell(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
            self.set(col, row, Cell { ch, rgb: Some(rgb) });
        }
    }

    /// Write the grid to a terminal.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for cell in &self.cells[row * self.cols..(row + 1) * self.cols] {
                let (r, g, b) = cell.rgb.unwrap_or(FALLBACK_RGB);
                writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn edge_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay <= ax * 0.4 {
        '-'
    } else if ax <= ay * 0.4 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Fill glyph for a color, by relative luminance.
fn fill_glyph(rgb: (u8, u8, u8)) -> char {
    let (r, g, b) = (rgb.0 as f64, rgb.1 as f64, rgb.2 as f64);
    let luminance = (0.2126 * r + 0.7152 * g + 0.0722 * b) / 255.0;
    let index = (luminance * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

impl DrawingSurface for AsciiCanvas {
    fn width(&self) -> f64 {
        self.cols as f64
    }

    fn height(&self) -> f64 {
        self.rows as f64 * CELL_ASPECT
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (c0, r0) = Self::to_cell(x, y);
        let (c1, r1) = Self::to_cell(x + width, y + height);
        for row in r0.max(0)..r1.min(self.rows as i64) {
            for col in c0.max(0)..c1.min(self.cols as i64) {
                self.set(col, row, BLANK);
            }
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(SubPath {
            points: vec![(x, y)],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        match self.path.last_mut() {
            Some(sub) if !sub.closed => sub.points.push((x, y)),
            _ => self.move_to(x, y),
        }
    }

    fn close_path(&mut self) {
        if let Some(sub) = self.path.last_mut() {
            sub.closed = true;
        }
    }

    fn stroke(&mut self) {
        let rgb = self.stroke_style.to_rgb().unwrap_or(FALLBACK_RGB);
        let segments: Vec<((f64, f64), (f64, f64))> = self
            .path
            .iter()
            .flat_map(|sub| {
                let closing = sub
                    .closed
                    .then(|| Some((*sub.points.last()?, *sub.points.first()?)))
                    .flatten();
                sub.points.windows(2).map(|w| (w[0], w[1])).chain(closing)
            })
            .collect();
        for (from, to) in segments {
            self.draw_line(from, to, rgb);
        }
    }

    /// Even-odd scanline fill sampled at cell centres.
    fn fill(&mut self) {
        let rgb = self.fill_style.to_rgb().unwrap_or(FALLBACK_RGB);
        let cell = Cell {
            ch: fill_glyph(rgb),
            rgb: Some(rgb),
        };
        let edges: Vec<((f64, f64), (f64, f64))> = self
            .path
            .iter()
            .filter(|sub| sub.points.len() >= 3)
            .flat_map(|sub| {
                let n = sub.points.len();
                (0..n).map(move |i| (sub.points[i], sub.points[(i + 1) % n]))
            })
            .collect();

        let mut crossings = Vec::new();
        for row in 0..self.rows {
            let y = (row as f64 + 0.5) * CELL_ASPECT;
            crossings.clear();
            for &((x0, y0), (x1, y1)) in &edges {
                if (y0 <= y) != (y1 <= y) {
                    crossings.push(x0 + (y - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0) as i64;
                let end = (span[1] - 0.5).floor().min(self.cols as f64 - 1.0) as i64;
                for col in start..=end {
                    self.set(col, row as i64, cell);
                }
            }
        }
    }

    fn set_stroke_style(&mut self, color: &Color) {
        self.stroke_style = color.clone();
    }

    fn set_fill_style(&mut self, color: &Color) {
        self.fill_style = color.clone();
    }
}
