use glam::{DAffine2, DVec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

pub mod palette {
    use super::Color;

    pub const CYAN: Color = Color::rgb(0x00, 0xf5, 0xff);
    pub const VIOLET: Color = Color::rgb(0xe0, 0x56, 0xfd);
    pub const RED: Color = Color::rgb(0xff, 0x6b, 0x6b);
    pub const GREEN: Color = Color::rgb(0x2e, 0xcc, 0x71);
    pub const YELLOW: Color = Color::rgb(0xf1, 0xc4, 0x0f);
    pub const ORANGE: Color = Color::rgb(0xf3, 0x9c, 0x12);
    pub const STEEL: Color = Color::rgb(0x7f, 0x8c, 0x8d);
    pub const SILVER: Color = Color::rgb(0xbd, 0xc3, 0xc7);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GROUND: Color = Color::rgba(0.39, 0.47, 0.63, 0.5);
    pub const GRID: Color = Color::rgba(1.0, 1.0, 1.0, 0.025);
    pub const OVERLAY: Color = Color::rgba(1.0, 1.0, 1.0, 0.25);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A primitive handed to the drawing backend.
///
/// Coordinates are surface units under the currently pushed transform,
/// except [`DrawCommand::Hud`] which always draws in untransformed viewport
/// space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Dot {
        at: DVec2,
        radius: f64,
        color: Color,
    },
    Ring {
        at: DVec2,
        radius: f64,
        width: f64,
        color: Color,
    },
    Line {
        from: DVec2,
        to: DVec2,
        width: f64,
        color: Color,
    },
    Arrow {
        from: DVec2,
        to: DVec2,
        color: Color,
        label: Option<String>,
    },
    Trail {
        points: Vec<DVec2>,
        width: f64,
        color: Color,
    },
    Polygon {
        points: Vec<DVec2>,
        color: Color,
    },
    Rect {
        at: DVec2,
        size: DVec2,
        color: Color,
    },
    Label {
        at: DVec2,
        text: String,
        color: Color,
    },
    Text {
        at: DVec2,
        text: String,
        align: Align,
        color: Color,
    },
    Hud {
        at: DVec2,
        lines: Vec<String>,
    },
}

/// The drawing backend a runtime renders into.
pub trait Surface {
    /// Width and height in surface units.
    fn viewport(&self) -> DVec2;

    fn clear(&mut self);

    /// Background grid with `spacing` between lines, drawn under `transform`.
    fn grid(&mut self, spacing: f64, transform: DAffine2);

    fn push_transform(&mut self, transform: DAffine2);

    fn pop_transform(&mut self);

    fn draw(&mut self, command: DrawCommand);

    fn dot(&mut self, at: DVec2, radius: f64, color: Color) {
        self.draw(DrawCommand::Dot { at, radius, color });
    }

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: Color) {
        self.draw(DrawCommand::Line { from, to, width, color });
    }

    /// Arrows shorter than 3 units are not drawn.
    fn arrow(&mut self, from: DVec2, to: DVec2, color: Color, label: Option<String>) {
        if from.distance(to) < 3.0 {
            return;
        }
        self.draw(DrawCommand::Arrow { from, to, color, label });
    }

    fn label(&mut self, at: DVec2, text: String, color: Color) {
        self.draw(DrawCommand::Label { at, text, color });
    }

    fn hud(&mut self, lines: Vec<String>) {
        self.draw(DrawCommand::Hud {
            at: DVec2::new(24.0, 24.0),
            lines,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Clear,
    Grid { spacing: f64, transform: DAffine2 },
    Push(DAffine2),
    Pop,
    Draw(DrawCommand),
}

/// A surface that keeps every call, for headless runs and tests.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: DVec2,
    events: Vec<SurfaceEvent>,
    stack: Vec<DAffine2>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: DVec2::new(width, height),
            events: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn draws(&self) -> impl Iterator<Item = &DrawCommand> {
        self.events.iter().filter_map(|e| match e {
            SurfaceEvent::Draw(cmd) => Some(cmd),
            _ => None,
        })
    }

    /// Number of `clear` calls, one per rendered frame.
    pub fn frames(&self) -> usize {
        self.events.iter().filter(|e| matches!(e, SurfaceEvent::Clear)).count()
    }

    /// Transform depth left open by the last frame.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Surface for RecordingSurface {
    fn viewport(&self) -> DVec2 {
        self.size
    }

    fn clear(&mut self) {
        self.events.push(SurfaceEvent::Clear);
    }

    fn grid(&mut self, spacing: f64, transform: DAffine2) {
        self.events.push(SurfaceEvent::Grid { spacing, transform });
    }

    fn push_transform(&mut self, transform: DAffine2) {
        self.stack.push(transform);
        self.events.push(SurfaceEvent::Push(transform));
    }

    fn pop_transform(&mut self) {
        self.stack.pop();
        self.events.push(SurfaceEvent::Pop);
    }

    fn draw(&mut self, command: DrawCommand) {
        self.events.push(SurfaceEvent::Draw(command));
    }
}
