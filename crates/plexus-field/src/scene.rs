//! Draw list produced by one frame of the field.

/// One primitive on the drawing surface. Coordinates are surface pixels with
/// the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Filled circle.
    Dot {
        x: f64,
        y: f64,
        radius: f64,
        alpha: f64,
    },
    /// Straight segment.
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        alpha: f64,
    },
}

/// The drawing surface: its size plus everything drawn on it this frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn fill_circle(&mut self, x: f64, y: f64, radius: f64, alpha: f64) {
        self.commands.push(DrawCommand::Dot {
            x,
            y,
            radius,
            alpha,
        });
    }

    pub fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), alpha: f64) {
        self.commands.push(DrawCommand::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            alpha,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn dots(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Dot { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}
