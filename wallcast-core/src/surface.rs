/// Drawing-surface abstraction the renderer paints onto
use crate::color::Color;

/// A minimal 2D drawing API: rectangles and closed polygon paths.
///
/// Coordinates are surface pixels with the origin at the top-left corner.
/// Frontends implement this over whatever they draw to (a terminal cell
/// buffer, an HTML canvas, ...).
pub trait Surface {
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_stroke_width(&mut self, width: f32);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn close_path(&mut self);

    /// Fill the current path with the fill color.
    fn fill(&mut self);
    /// Outline the current path with the stroke color and width.
    fn stroke(&mut self);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetStrokeWidth(f32),
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    ClosePath,
    Fill,
    Stroke,
}

/// Surface that records every call instead of drawing.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of filled paths, i.e. polygons actually rasterized.
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill))
            .count()
    }

    /// Vertices of every filled path, in drawing order, paired with the fill
    /// color active when it was filled.
    pub fn filled_polygons(&self) -> Vec<(Color, Vec<(f32, f32)>)> {
        let mut polygons = Vec::new();
        let mut fill_color = Color::BLACK;
        let mut path = Vec::new();

        for command in &self.commands {
            match *command {
                DrawCommand::SetFillColor(color) => fill_color = color,
                DrawCommand::BeginPath => path.clear(),
                DrawCommand::MoveTo(x, y) | DrawCommand::LineTo(x, y) => path.push((x, y)),
                DrawCommand::Fill => polygons.push((fill_color, path.clone())),
                _ => {}
            }
        }

        polygons
    }
}

impl Surface for CommandRecorder {
    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetStrokeColor(color));
    }

    fn set_stroke_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::SetStrokeWidth(width));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}
