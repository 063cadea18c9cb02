use ratatui::prelude::*;

/// Maps a sub-cell dot position to its braille bit. Braille cells are
/// 2 dots wide and 4 dots tall; the low six bits cover rows 0..3 of
/// both columns and the last row lives in bits 6 and 7.
fn braille_bit(dx: i32, dy: i32) -> u8 {
    match (dx, dy) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0,
    }
}

/// A drawing surface backed by braille characters: every terminal cell
/// holds a 2x4 dot block, so a `cols` x `rows` area yields a
/// `cols*2` x `rows*4` pixel grid. Each cell keeps the color of the
/// last shape that touched it.
pub struct Raster {
    cols: usize,
    rows: usize,
    bg: Color,
    cells: Vec<(u8, Color)>,
}

impl Raster {
    pub fn new(cols: usize, rows: usize, bg: Color) -> Self {
        Self {
            cols,
            rows,
            bg,
            cells: vec![(0, bg); cols * rows],
        }
    }

    /// Surface width in dots.
    pub fn width(&self) -> i32 {
        self.cols as i32 * 2
    }

    /// Surface height in dots.
    pub fn height(&self) -> i32 {
        self.rows as i32 * 4
    }

    pub fn dot(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return;
        }
        let cell = (y as usize / 4) * self.cols + x as usize / 2;
        let bit = braille_bit(x % 2, y % 4);
        self.cells[cell].0 |= bit;
        self.cells[cell].1 = color;
    }

    /// Punches a dot back out without repainting the cell, so shapes can
    /// carry cutouts.
    pub fn erase_dot(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return;
        }
        let cell = (y as usize / 4) * self.cols + x as usize / 2;
        let bit = braille_bit(x % 2, y % 4);
        self.cells[cell].0 &= !bit;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for dy in 0..h {
            for dx in 0..w {
                self.dot(x + dx, y + dy, color);
            }
        }
    }

    pub fn erase_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        for dy in 0..h {
            for dx in 0..w {
                self.erase_dot(x + dx, y + dy);
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: Color) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.dot(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Scanline fill over the bounding box, keeping dots on the inside of
    /// all three edges regardless of winding.
    pub fn fill_triangle(
        &mut self,
        a: (i32, i32),
        b: (i32, i32),
        c: (i32, i32),
        color: Color,
    ) {
        let min_x = a.0.min(b.0).min(c.0);
        let max_x = a.0.max(b.0).max(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_y = a.1.max(b.1).max(c.1);
        let area = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
        if area == 0 {
            return;
        }
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let w0 = (b.0 - a.0) * (y - a.1) - (b.1 - a.1) * (x - a.0);
                let w1 = (c.0 - b.0) * (y - b.1) - (c.1 - b.1) * (x - b.0);
                let w2 = (a.0 - c.0) * (y - c.1) - (a.1 - c.1) * (x - c.0);
                if (w0 >= 0 && w1 >= 0 && w2 >= 0) || (w0 <= 0 && w1 <= 0 && w2 <= 0) {
                    self.dot(x, y, color);
                }
            }
        }
    }

    /// Vertical dashed line: `on` dots drawn, `off` dots skipped.
    pub fn dashed_vline(&mut self, x: i32, on: i32, off: i32, color: Color) {
        let period = (on + off).max(1);
        for y in 0..self.height() {
            if y % period < on {
                self.dot(x, y, color);
            }
        }
    }

    /// Renders the dot grid into one styled line per cell row. Empty
    /// cells become background-colored blanks.
    pub fn into_lines(self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let mut spans = Vec::with_capacity(self.cols);
            for col in 0..self.cols {
                let (bits, color) = self.cells[row * self.cols + col];
                if bits == 0 {
                    spans.push(Span::styled(" ", Style::default().bg(self.bg)));
                } else {
                    let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                    spans.push(Span::styled(
                        String::from(ch),
                        Style::default().fg(color).bg(self.bg),
                    ));
                }
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}
