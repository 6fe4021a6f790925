/// ASCII line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Frame, ScreenPoint};

const VERTEX_GLYPH: char = 'o';

/// Draws projected frames into a character grid.
///
/// Frames arrive in canvas pixels; each cell covers
/// `canvas_width / width` by `canvas_height / height` pixels.
pub struct LineRenderer {
    width: usize,
    height: usize,
    canvas_width: f64,
    canvas_height: f64,
    char_buffer: Vec<char>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize, canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            width,
            height,
            canvas_width: f64::from(canvas_width),
            canvas_height: f64::from(canvas_height),
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![' '; width * height];
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    /// Convert a movement in cells to canvas pixels
    pub fn cells_to_canvas(&self, columns: f64, rows: f64) -> (f64, f64) {
        if self.width == 0 || self.height == 0 {
            return (0.0, 0.0);
        }
        (
            columns * self.canvas_width / self.width as f64,
            rows * self.canvas_height / self.height as f64,
        )
    }

    fn to_cell(&self, point: ScreenPoint) -> (f64, f64) {
        (
            f64::from(point.x) * self.width as f64 / self.canvas_width,
            f64::from(point.y) * self.height as f64 / self.canvas_height,
        )
    }

    pub fn draw_frame(&mut self, frame: &Frame) {
        for &(from, to) in &frame.segments {
            let (from, to) = (self.to_cell(from), self.to_cell(to));
            self.draw_segment(from, to);
        }
        for &point in &frame.points {
            let (x, y) = self.to_cell(point);
            self.plot(x.floor() as i64, y.floor() as i64, VERTEX_GLYPH);
        }
    }

    /// Bresenham's line between two cell positions, clipped to the grid
    fn draw_segment(&mut self, from: (f64, f64), to: (f64, f64)) {
        let glyph = slope_glyph(to.0 - from.0, to.1 - from.1);
        let Some((a, b)) = clip_segment(from, to, self.width as f64, self.height as f64) else {
            return;
        };

        let (mut x0, mut y0) = (a.0.floor() as i64, a.1.floor() as i64);
        let (x1, y1) = (b.0.floor() as i64, b.1.floor() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, glyph);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, glyph: char) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.char_buffer[y as usize * self.width + x as usize] = glyph;
    }

    /// The grid as plain text, one line per row
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.char_buffer.chunks(self.width.max(1)) {
            text.extend(row.iter());
            text.push('\n');
        }
        text
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];

                let color = match c {
                    VERTEX_GLYPH => Color::Yellow,
                    ' ' => Color::Reset,
                    _ => Color::Cyan,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Pick a line character from the segment's direction (y grows downward)
fn slope_glyph(dx: f64, dy: f64) -> char {
    if dx.abs() > 2.0 * dy.abs() {
        '-'
    } else if dy.abs() > 2.0 * dx.abs() {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment to `[0, width] x [0, height]`
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    width: f64,
    height: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let edges = [
        (-dx, from.0),
        (dx, width - from.0),
        (-dy, from.1),
        (dy, height - from.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}
