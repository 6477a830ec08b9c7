/// Half-block pixel canvas for terminal rendering
///
/// Each terminal cell shows two vertically stacked pixels: the glyph `▀` is
/// drawn with the upper pixel as foreground and the lower one as background,
/// which keeps pixels roughly square.
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wallcast_core::{Color, Surface};

const HALF_BLOCK: char = '▀';

#[derive(Debug, Clone, Default)]
struct SubPath {
    points: Vec<(f32, f32)>,
    closed: bool,
}

/// Pixel buffer implementing [`Surface`].
pub struct TerminalCanvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    fill_color: Color,
    stroke_color: Color,
    stroke_width: f32,
    path: Vec<SubPath>,
}

impl TerminalCanvas {
    /// Canvas covering `columns x rows` terminal cells.
    pub fn for_terminal(columns: u16, rows: u16) -> Self {
        Self::new(columns as usize, rows as usize * 2)
    }

    /// Canvas of `width x height` pixels. An odd height is rounded up so
    /// every cell has two pixels.
    pub fn new(width: usize, height: usize) -> Self {
        let height = height + height % 2;
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            stroke_width: 1.0,
            path: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    fn current_subpath(&mut self) -> &mut SubPath {
        if self.path.is_empty() {
            self.path.push(SubPath::default());
        }
        let last = self.path.len() - 1;
        &mut self.path[last]
    }

    fn rasterize_triangle(&mut self, v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), color: Color) {
        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to canvas bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.set_pixel(x, y, color);
                    }
                }
            }
        }
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32)) {
        let radius = ((self.stroke_width - 1.0) / 2.0).round().max(0.0) as i32;
        let color = self.stroke_color;

        // Only step over the part that can touch the canvas.
        let margin = radius as f32 + 1.0;
        let bounds_min = (-margin, -margin);
        let bounds_max = (self.width as f32 + margin, self.height as f32 + margin);
        let (from, to) = match clip_segment(from, to, bounds_min, bounds_max) {
            Some(segment) => segment,
            None => return,
        };

        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (from.0 + dx * t).floor() as i32;
            let y = (from.1 + dy * t).floor() as i32;
            for by in -radius..=radius {
                for bx in -radius..=radius {
                    self.set_pixel(x + bx, y + by, color);
                }
            }
        }
    }

    /// Write the canvas as text rows separated by line breaks.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.height / 2 {
            if row > 0 {
                writer.queue(Print("\r\n"))?;
            }
            self.queue_row(writer, row)?;
        }
        Ok(())
    }

    /// Write the canvas over the terminal screen starting at the top-left
    /// cell, without scrolling.
    pub fn draw_in_place<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.height / 2 {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            self.queue_row(writer, row)?;
        }
        Ok(())
    }

    fn queue_row<W: Write>(&self, writer: &mut W, row: usize) -> std::io::Result<()> {
        let upper = &self.pixels[2 * row * self.width..(2 * row + 1) * self.width];
        let lower = &self.pixels[(2 * row + 1) * self.width..(2 * row + 2) * self.width];
        let mut current: Option<(Color, Color)> = None;

        for (&top, &bottom) in upper.iter().zip(lower) {
            if current != Some((top, bottom)) {
                writer.queue(SetForegroundColor(term_color(top)))?;
                writer.queue(SetBackgroundColor(term_color(bottom)))?;
                current = Some((top, bottom));
            }
            writer.queue(Print(HALF_BLOCK))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for TerminalCanvas {
    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        // Pixels whose centers fall inside the rectangle.
        let x0 = (x - 0.5).ceil().max(0.0) as usize;
        let y0 = (y - 0.5).ceil().max(0.0) as usize;
        let x1 = ((x + width - 0.5).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((y + height - 0.5).ceil().max(0.0) as usize).min(self.height);

        for py in y0..y1 {
            let row = py * self.width;
            self.pixels[row + x0.min(x1)..row + x1].fill(self.fill_color);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push(SubPath {
            points: vec![(x, y)],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current_subpath().points.push((x, y));
    }

    fn close_path(&mut self) {
        self.current_subpath().closed = true;
    }

    fn fill(&mut self) {
        let color = self.fill_color;
        let path = std::mem::take(&mut self.path);
        for sub in &path {
            // Fan triangulation; wall quads are always convex.
            if let Some((&first, rest)) = sub.points.split_first() {
                for pair in rest.windows(2) {
                    self.rasterize_triangle(first, pair[0], pair[1], color);
                }
            }
        }
        self.path = path;
    }

    fn stroke(&mut self) {
        let path = std::mem::take(&mut self.path);
        for sub in &path {
            for pair in sub.points.windows(2) {
                self.draw_line(pair[0], pair[1]);
            }
            if sub.closed && sub.points.len() > 2 {
                if let (Some(&last), Some(&first)) = (sub.points.last(), sub.points.first()) {
                    self.draw_line(last, first);
                }
            }
            if sub.points.len() == 1 {
                self.draw_line(sub.points[0], sub.points[0]);
            }
        }
        self.path = path;
    }
}

/// Liang-Barsky clip of a segment against an axis-aligned rectangle.
fn clip_segment(
    from: (f32, f32),
    to: (f32, f32),
    min: (f32, f32),
    max: (f32, f32),
) -> Option<((f32, f32), (f32, f32))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    let edges = [
        (-dx, from.0 - min.0),
        (dx, max.0 - from.0),
        (-dy, from.1 - min.1),
        (dy, max.1 - from.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge: either fully inside or fully outside.
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
        (from.0 + dx * t0, from.1 + dy * t0),
        (from.0 + dx * t1, from.1 + dy * t1),
    ))
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    fn square(canvas: &mut TerminalCanvas, x0: f32, y0: f32, x1: f32, y1: f32) {
        canvas.begin_path();
        canvas.move_to(x0, y0);
        canvas.line_to(x1, y0);
        canvas.line_to(x1, y1);
        canvas.line_to(x0, y1);
        canvas.close_path();
    }

    #[test]
    fn test_odd_height_rounds_up() {
        let canvas = TerminalCanvas::new(4, 5);
        assert_eq!(canvas.height(), 6);
        assert_eq!(TerminalCanvas::for_terminal(10, 3).height(), 6);
    }

    #[test]
    fn test_fill_rect_covers_pixel_centers() {
        let mut canvas = TerminalCanvas::new(8, 8);
        canvas.set_fill_color(RED);
        canvas.fill_rect(0.0, 0.0, 8.0, 4.0);
        assert_eq!(canvas.pixel(7, 3), Some(RED));
        assert_eq!(canvas.pixel(0, 4), Some(Color::BLACK));

        // Partially off-canvas rectangles are clipped.
        canvas.set_fill_color(BLUE);
        canvas.fill_rect(-3.0, 6.0, 100.0, 100.0);
        assert_eq!(canvas.pixel(0, 6), Some(BLUE));
        assert_eq!(canvas.pixel(7, 7), Some(BLUE));
        assert_eq!(canvas.pixel(0, 5), Some(Color::BLACK));
    }

    #[test]
    fn test_fill_quad() {
        let mut canvas = TerminalCanvas::new(10, 10);
        canvas.set_fill_color(RED);
        square(&mut canvas, 2.0, 2.0, 6.0, 6.0);
        canvas.fill();

        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(5, 5), Some(RED));
        assert_eq!(canvas.pixel(3, 5), Some(RED));
        assert_eq!(canvas.pixel(6, 6), Some(Color::BLACK));
        assert_eq!(canvas.pixel(1, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_fill_handles_either_winding() {
        let mut canvas = TerminalCanvas::new(10, 10);
        canvas.set_fill_color(BLUE);
        square(&mut canvas, 6.0, 6.0, 2.0, 2.0);
        canvas.fill();
        assert_eq!(canvas.pixel(4, 4), Some(BLUE));
    }

    #[test]
    fn test_stroke_outlines_closed_path() {
        let mut canvas = TerminalCanvas::new(10, 10);
        canvas.set_stroke_color(RED);
        square(&mut canvas, 1.0, 1.0, 8.0, 8.0);
        canvas.stroke();

        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(8, 4), Some(RED));
        // Closing edge back to the start.
        assert_eq!(canvas.pixel(1, 5), Some(RED));
        assert_eq!(canvas.pixel(4, 4), Some(Color::BLACK));
    }

    #[test]
    fn test_wide_stroke() {
        let mut canvas = TerminalCanvas::new(10, 10);
        canvas.set_stroke_color(RED);
        canvas.set_stroke_width(3.0);
        canvas.begin_path();
        canvas.move_to(0.0, 5.0);
        canvas.line_to(9.0, 5.0);
        canvas.stroke();
        assert_eq!(canvas.pixel(4, 4), Some(RED));
        assert_eq!(canvas.pixel(4, 6), Some(RED));
        assert_eq!(canvas.pixel(4, 7), Some(Color::BLACK));
    }

    #[test]
    fn test_clip_segment_trims_far_endpoints() {
        let (a, b) = clip_segment((-50_000.0, 5.0), (60_000.0, 5.0), (-1.0, -1.0), (11.0, 11.0))
            .expect("segment crosses the canvas");
        assert!((a.0 + 1.0).abs() < 0.05 && a.1 == 5.0, "{a:?}");
        assert!((b.0 - 11.0).abs() < 0.05 && b.1 == 5.0, "{b:?}");
    }

    #[test]
    fn test_clip_segment_rejects_outside() {
        assert!(clip_segment((-50.0, -3.0), (50.0, -3.0), (-1.0, -1.0), (11.0, 11.0)).is_none());
        assert!(clip_segment((20.0, 0.0), (30.0, 9.0), (-1.0, -1.0), (11.0, 11.0)).is_none());
        // Fully inside stays untouched.
        assert_eq!(
            clip_segment((2.0, 3.0), (7.0, 8.0), (-1.0, -1.0), (11.0, 11.0)),
            Some(((2.0, 3.0), (7.0, 8.0)))
        );
    }

    #[test]
    fn test_huge_line_still_draws_visible_part() {
        let mut canvas = TerminalCanvas::new(10, 10);
        canvas.set_stroke_color(RED);
        canvas.begin_path();
        canvas.move_to(-1.0e6, 3.0);
        canvas.line_to(2.0e6, 3.0);
        canvas.stroke();
        assert!((0..10).all(|x| canvas.pixel(x, 3) == Some(RED)));
        assert_eq!(canvas.pixel(5, 4), Some(Color::BLACK));
    }

    #[test]
    fn test_degenerate_quad_draws_only_outline() {
        let mut canvas = TerminalCanvas::new(10, 10);
        canvas.set_fill_color(BLUE);
        canvas.set_stroke_color(RED);
        square(&mut canvas, 4.0, 1.0, 4.0, 8.0);
        canvas.fill();
        canvas.stroke();
        assert_eq!(canvas.pixel(4, 5), Some(RED));
        assert!((0..10).all(|y| (0..10).all(|x| canvas.pixel(x, y) != Some(BLUE))));
    }

    #[test]
    fn test_draw_emits_one_glyph_per_cell() {
        let mut canvas = TerminalCanvas::new(5, 4);
        canvas.set_fill_color(RED);
        canvas.fill_rect(0.0, 0.0, 5.0, 1.0);

        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 10);
        assert_eq!(text.matches("\r\n").count(), 1);
        assert!(text.contains("38;2;255;0;0"));
    }
}
