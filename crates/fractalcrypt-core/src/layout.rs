//! Circular point layout.
//!
//! One point per bit, spaced evenly around a ring centred on the drawing
//! surface. Every third point is pushed a little further out so the ring is
//! not perfectly smooth. Points whose resting positions are close enough are
//! linked, and those links never change afterwards even though the live
//! positions keep moving.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ring radius as a fraction of the smaller surface dimension.
pub const VISUAL_RADIUS_FRACTION: f64 = 0.35;
/// Points sit at this fraction of the visual radius, leaving a margin.
pub const SAFE_RADIUS_FACTOR: f64 = 0.9;
/// Extra radial offset applied to every third point.
pub const NUDGE_DISTANCE: f64 = 20.0;
/// Points closer than this fraction of the visual radius are connected.
pub const CONNECTION_THRESHOLD: f64 = 0.3;

/// The bit a point represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
}

impl Bit {
    /// `'1'` is a one; anything else is drawn as a zero.
    pub fn from_char(c: char) -> Self {
        if c == '1' { Self::One } else { Self::Zero }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
        }
    }
}

impl std::fmt::Display for Bit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Size of the drawing surface and the ring geometry derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f64 {
        self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }

    /// Nominal ring radius: 35% of the smaller dimension.
    pub fn visual_radius(&self) -> f64 {
        self.width.min(self.height) * VISUAL_RADIUS_FRACTION
    }

    /// Radius the points are actually laid out on.
    pub fn safe_radius(&self) -> f64 {
        self.visual_radius() * SAFE_RADIUS_FACTOR
    }

    /// Distance under which two resting positions are connected.
    pub fn connection_distance(&self) -> f64 {
        self.visual_radius() * CONNECTION_THRESHOLD
    }
}

/// One rendered bit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub bit: Bit,
    /// Position around the ring in radians.
    pub angle: f64,
    /// Layout radius the point was placed on.
    pub radius: f64,
    /// Resting position, fixed at layout time.
    pub original_x: f64,
    pub original_y: f64,
    /// Live position, rewritten every frame.
    pub x: f64,
    pub y: f64,
    /// Random phase in `[0, 2π)`. Not read by the default render path.
    pub phase: f64,
    pub energy: f64,
    /// Indices of points whose resting position is within reach.
    pub connections: Vec<usize>,
}

impl Point {
    /// Unit vector pointing away from the ring centre.
    pub fn direction(&self) -> (f64, f64) {
        (self.angle.cos(), self.angle.sin())
    }
}

/// Lay out one point per character of `binary` around the viewport's ring.
pub fn generate_points<R: Rng + ?Sized>(
    binary: &str,
    viewport: &Viewport,
    rng: &mut R,
) -> Vec<Point> {
    let bits: Vec<Bit> = binary.chars().map(Bit::from_char).collect();
    let n = bits.len();
    let safe_radius = viewport.safe_radius();
    let (cx, cy) = (viewport.center_x(), viewport.center_y());

    let mut points: Vec<Point> = bits
        .into_iter()
        .enumerate()
        .map(|(i, bit)| {
            let angle = i as f64 / n as f64 * TAU;
            let (cos, sin) = (angle.cos(), angle.sin());

            let mut x = cx + cos * safe_radius;
            let mut y = cy + sin * safe_radius;
            if i % 3 == 0 {
                x += cos * NUDGE_DISTANCE;
                y += sin * NUDGE_DISTANCE;
            }

            Point {
                bit,
                angle,
                radius: safe_radius,
                original_x: x,
                original_y: y,
                x,
                y,
                phase: rng.random_range(0.0..TAU),
                energy: 1.0,
                connections: Vec::new(),
            }
        })
        .collect();

    connect(&mut points, viewport.connection_distance());
    points
}

/// Link every ordered pair of distinct points whose resting positions are
/// closer than `threshold`. Quadratic in the number of points.
fn connect(points: &mut [Point], threshold: f64) {
    let resting: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.original_x, p.original_y))
        .collect();

    for (i, point) in points.iter_mut().enumerate() {
        let (xi, yi) = resting[i];
        point.connections = resting
            .iter()
            .enumerate()
            .filter(|&(j, &(xj, yj))| j != i && (xj - xi).hypot(yj - yi) < threshold)
            .map(|(j, _)| j)
            .collect();
    }
}
