//! Immediate-mode drawing surface abstraction.
//!
//! The render loop talks to a [`Canvas`], a small subset of the HTML canvas 2D
//! context: clear, stroke/fill styles, path building, fill and stroke. The
//! browser crate implements it over `CanvasRenderingContext2d`; [`DrawList`]
//! records the calls so they can be inspected or replayed elsewhere.

use serde::{Deserialize, Serialize};

use crate::layout::Viewport;

/// An sRGB colour with straight alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// CSS colour string accepted by canvas style setters.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// A colour stop inside a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Fill style: a flat colour or a two-circle radial gradient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Rgba),
    RadialGradient {
        x0: f64,
        y0: f64,
        r0: f64,
        x1: f64,
        y1: f64,
        r1: f64,
        stops: Vec<ColorStop>,
    },
}

impl Paint {
    /// Dominant colour: the solid colour, or the first gradient stop.
    pub fn primary_color(&self) -> Rgba {
        match self {
            Self::Solid(c) => *c,
            Self::RadialGradient { stops, .. } => {
                stops.first().map(|s| s.color).unwrap_or(Rgba::TRANSPARENT)
            }
        }
    }
}

/// 2D drawing operations used by the renderer.
pub trait Canvas {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn set_stroke_color(&mut self, color: Rgba);
    fn set_line_width(&mut self, width: f64);
    fn set_fill(&mut self, paint: &Paint);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Add a circular arc from `start` to `end` radians.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// A canvas that knows its own size.
pub trait Surface: Canvas {
    /// Measure (and, where the platform allows, resize) the surface.
    fn fit(&mut self) -> Viewport;
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    SetStrokeColor(Rgba),
    SetLineWidth(f64),
    SetFill(Paint),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
    Fill,
    Stroke,
    FillRect { x: f64, y: f64, width: f64, height: f64 },
}

/// Recording surface with a fixed, settable size.
///
/// A clear covering the whole surface discards everything recorded before
/// it, so the list always holds exactly the latest frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Change the size reported by the next [`Surface::fit`].
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands other than the frame-opening clear.
    pub fn draw_call_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::ClearRect { .. }))
            .count()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Canvas for DrawList {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let covers_all = x <= 0.0
            && y <= 0.0
            && x + width >= self.viewport.width
            && y + height >= self.viewport.height;
        if covers_all {
            self.commands.clear();
        }
        self.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn set_stroke_color(&mut self, color: Rgba) {
        self.push(DrawCommand::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::SetLineWidth(width));
    }

    fn set_fill(&mut self, paint: &Paint) {
        self.push(DrawCommand::SetFill(paint.clone()));
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        self.push(DrawCommand::Arc { x, y, radius, start, end });
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push(DrawCommand::FillRect { x, y, width, height });
    }
}

impl Surface for DrawList {
    fn fit(&mut self) -> Viewport {
        self.viewport
    }
}
