//! Animated scene state: the laid-out points plus the animation clock.

use serde::{Deserialize, Serialize};

use crate::layout::{Point, Viewport};

/// Clock advance per frame.
pub const TIME_STEP: f64 = 0.01;
/// Peak radial displacement of the breathing wave.
pub const WAVE_AMPLITUDE: f64 = 5.0;
/// Particles travelling along each connection.
pub const PARTICLES_PER_CONNECTION: usize = 2;
/// Particle progress per unit of scene time.
pub const PARTICLE_SPEED: f64 = 0.5;

/// Extra displacement `(dx, dy)` for a point resting at `(x, y)` at `time`.
pub type Drift = fn(f64, f64, f64) -> (f64, f64);

/// Points and elapsed time for one encrypt/decrypt session.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    points: Vec<Point>,
    time: f64,
}

impl Scene {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points, time: 0.0 }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total number of directed connections.
    pub fn connection_count(&self) -> usize {
        self.points.iter().map(|p| p.connections.len()).sum()
    }

    /// Step the clock and move every point along its radial wave.
    ///
    /// `drift` adds an extra per-point offset computed from the resting
    /// position and the new time; pass `None` for the plain breathing motion.
    pub fn advance(&mut self, drift: Option<Drift>) {
        self.time += TIME_STEP;
        let time = self.time;

        for point in &mut self.points {
            let offset = wave_offset(time, point.angle);
            let (cos, sin) = point.direction();
            point.x = point.original_x + cos * offset;
            point.y = point.original_y + sin * offset;

            if let Some(drift) = drift {
                let (dx, dy) = drift(point.original_x, point.original_y, time);
                point.x += dx;
                point.y += dy;
            }
        }
    }

    pub fn snapshot(&self, viewport: Viewport) -> SceneSnapshot {
        SceneSnapshot {
            viewport,
            time: self.time,
            points: self.points.clone(),
        }
    }
}

/// Radial displacement at `time` for a point at `angle`.
pub fn wave_offset(time: f64, angle: f64) -> f64 {
    (time + angle).sin() * WAVE_AMPLITUDE
}

/// Fraction along a connection of particle `index` at `time`, in `[0, 1)`.
pub fn particle_progress(time: f64, index: usize) -> f64 {
    (time * PARTICLE_SPEED + index as f64 / PARTICLES_PER_CONNECTION as f64).rem_euclid(1.0)
}

/// Linear interpolation between two positions.
pub fn lerp(from: (f64, f64), to: (f64, f64), t: f64) -> (f64, f64) {
    (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t)
}

/// Serializable view of a scene, as dumped by `fractalcrypt layout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub viewport: Viewport,
    pub time: f64,
    pub points: Vec<Point>,
}

impl SceneSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
