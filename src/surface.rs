use nannou::prelude::*;

/// 描画色 / Accent color used for particles, links and pulses: rgb(0, 255, 224).
pub fn accent(alpha: f32) -> Srgba {
    srgba(0.0, 1.0, 224.0 / 255.0, alpha)
}

/// 描画領域の大きさ / Size of the drawable area in surface space
/// (top-left origin, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Bounds { width, height }
    }

    /// True when there is no area to place particles in.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Drawing primitives issued against the surface each frame.
pub trait Surface {
    fn bounds(&self) -> Bounds;
    fn resize(&mut self, bounds: Bounds);
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Point2, radius: f32, color: Srgba);
    fn stroke_circle(&mut self, center: Point2, radius: f32, weight: f32, color: Srgba);
    fn line(&mut self, from: Point2, to: Point2, weight: f32, color: Srgba);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        center: Point2,
        radius: f32,
        color: Srgba,
    },
    StrokeCircle {
        center: Point2,
        radius: f32,
        weight: f32,
        color: Srgba,
    },
    Line {
        from: Point2,
        to: Point2,
        weight: f32,
        color: Srgba,
    },
}

/// 1フレーム分の描画コマンドを記録する
/// Records one frame of draw commands. `update` fills it, `view` replays it.
#[derive(Debug, Clone)]
pub struct DisplayList {
    bounds: Bounds,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(bounds: Bounds) -> Self {
        DisplayList {
            bounds,
            commands: Vec::with_capacity(256),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DisplayList {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    // Clearing drops everything recorded so far; the list only ever holds one frame.
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Point2, radius: f32, color: Srgba) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point2, radius: f32, weight: f32, color: Srgba) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            weight,
            color,
        });
    }

    fn line(&mut self, from: Point2, to: Point2, weight: f32, color: Srgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            weight,
            color,
        });
    }
}
