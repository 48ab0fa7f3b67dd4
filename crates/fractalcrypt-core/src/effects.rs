//! Optional cosmetic passes: hash-noise drift, a sliding perspective grid,
//! scanlines and a vignette. None of them run unless enabled through
//! [`RenderOptions`](crate::render::RenderOptions).

use crate::layout::Viewport;
use crate::surface::{Canvas, ColorStop, Paint, Rgba};

const NOISE_SCALE: f64 = 100.0;
const DRIFT_AMPLITUDE: f64 = 50.0;

const GRID_SIZE: f64 = 50.0;
const GRID_SPEED: f64 = 20.0;
const GRID_COLOR: Rgba = Rgba::new(15, 244, 198, 0.1);

const SCANLINE_SPACING: usize = 4;
const SCANLINE_HEIGHT: f64 = 2.0;
const SCANLINE_COLOR: Rgba = Rgba::new(0, 0, 0, 0.1);
const VIGNETTE_EDGE: Rgba = Rgba::new(0, 0, 0, 0.7);

/// Cheap lattice hash in `(-1, 1)`.
///
/// Inputs are floored and wrapped to `0..=255` before hashing, so the result
/// is constant across each unit cell.
pub fn noise(x: f64, y: f64) -> f64 {
    let xi = (x.floor() as i64 & 255) as f64;
    let yi = (y.floor() as i64 & 255) as f64;
    // f64 `%` keeps the sign of the dividend.
    (xi * 12.9898 + yi * 78.233).sin() * 43758.5453123 % 1.0
}

/// Displacement for a point resting at `(x, y)` at scene `time`.
pub fn fractal_offset(x: f64, y: f64, time: f64) -> (f64, f64) {
    let n1 = noise(x / NOISE_SCALE + time, y / NOISE_SCALE);
    let n2 = noise(x / NOISE_SCALE + time * 0.5, y / NOISE_SCALE + time * 0.5);
    (n1 * DRIFT_AMPLITUDE, n2 * DRIFT_AMPLITUDE)
}

/// Diagonal grid lines sliding with time.
pub fn draw_grid<C: Canvas + ?Sized>(canvas: &mut C, viewport: &Viewport, time: f64) {
    let (width, height) = (viewport.width, viewport.height);
    let offset = (time * GRID_SPEED) % GRID_SIZE;

    canvas.set_stroke_color(GRID_COLOR);
    canvas.set_line_width(1.0);

    let mut x = -GRID_SIZE;
    while x < width + GRID_SIZE {
        let x_pos = x + offset;
        canvas.begin_path();
        canvas.move_to(x_pos, 0.0);
        canvas.line_to(x_pos - height / 2.0, height);
        canvas.stroke();
        x += GRID_SIZE;
    }

    let mut y = -GRID_SIZE;
    while y < height + GRID_SIZE {
        let y_pos = y + offset;
        canvas.begin_path();
        canvas.move_to(0.0, y_pos);
        canvas.line_to(width, y_pos - width / 2.0);
        canvas.stroke();
        y += GRID_SIZE;
    }
}

/// Wobbling scanlines followed by a dark radial vignette.
pub fn draw_post_effects<C: Canvas + ?Sized>(canvas: &mut C, viewport: &Viewport, time: f64) {
    let (width, height) = (viewport.width, viewport.height);

    canvas.set_fill(&Paint::Solid(SCANLINE_COLOR));
    let rows = height.max(0.0).ceil() as usize;
    for y in (0..rows).step_by(SCANLINE_SPACING) {
        let y = y as f64;
        let offset = (time * 2.0 + y * 0.1).sin() * 2.0;
        canvas.fill_rect(0.0, y + offset, width, SCANLINE_HEIGHT);
    }

    let (cx, cy) = (width / 2.0, height / 2.0);
    canvas.set_fill(&Paint::RadialGradient {
        x0: cx,
        y0: cy,
        r0: 0.0,
        x1: cx,
        y1: cy,
        r1: width / 2.0,
        stops: vec![
            ColorStop { offset: 0.0, color: Rgba::TRANSPARENT },
            ColorStop { offset: 1.0, color: VIGNETTE_EDGE },
        ],
    });
    canvas.fill_rect(0.0, 0.0, width, height);
}
