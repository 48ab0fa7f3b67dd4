//! Frame renderer: connections, flowing particles, then glowing points.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::effects;
use crate::layout::{Bit, Viewport};
use crate::scene::{Drift, PARTICLES_PER_CONNECTION, Scene, lerp, particle_progress};
use crate::surface::{Canvas, ColorStop, Paint, Rgba};

/// Colour of `1` bits, connections and particles.
pub const ONE_COLOR: Rgba = Rgba::opaque(15, 244, 198);
/// Colour of `0` bits.
pub const ZERO_COLOR: Rgba = Rgba::opaque(255, 45, 85);

pub const CONNECTION_COLOR: Rgba = ONE_COLOR.with_alpha(0.4);
pub const CONNECTION_WIDTH: f64 = 0.8;
pub const PARTICLE_COLOR: Rgba = ONE_COLOR.with_alpha(0.6);
pub const PARTICLE_RADIUS: f64 = 2.0;
pub const GLOW_RADIUS: f64 = 12.0;
pub const GLOW_ALPHA: f64 = 0.3;
pub const CORE_RADIUS: f64 = 2.5;

/// Opt-in cosmetic passes. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Add hash-noise drift to the live point positions.
    pub fractal_drift: bool,
    /// Draw the sliding perspective grid behind the ring.
    pub grid: bool,
    /// Draw scanlines and a vignette over the finished frame.
    pub post_effects: bool,
}

pub fn bit_color(bit: Bit) -> Rgba {
    match bit {
        Bit::One => ONE_COLOR,
        Bit::Zero => ZERO_COLOR,
    }
}

/// Advance `scene` by one frame and draw it.
pub fn render_frame<C: Canvas + ?Sized>(
    scene: &mut Scene,
    viewport: &Viewport,
    options: &RenderOptions,
    canvas: &mut C,
) {
    let drift: Option<Drift> = options
        .fractal_drift
        .then_some(effects::fractal_offset as Drift);
    scene.advance(drift);

    canvas.clear_rect(0.0, 0.0, viewport.width, viewport.height);

    if options.grid {
        effects::draw_grid(canvas, viewport, scene.time());
    }
    draw_connections(scene, canvas);
    draw_points(scene, canvas);
    if options.post_effects {
        effects::draw_post_effects(canvas, viewport, scene.time());
    }
}

fn draw_connections<C: Canvas + ?Sized>(scene: &Scene, canvas: &mut C) {
    let points = scene.points();
    let time = scene.time();

    for point in points {
        let from = (point.x, point.y);
        // Snapshots loaded from JSON may carry stale indices.
        for other in point.connections.iter().filter_map(|&j| points.get(j)) {
            let to = (other.x, other.y);

            canvas.set_stroke_color(CONNECTION_COLOR);
            canvas.set_line_width(CONNECTION_WIDTH);
            canvas.begin_path();
            canvas.move_to(from.0, from.1);
            canvas.line_to(to.0, to.1);
            canvas.stroke();

            for p in 0..PARTICLES_PER_CONNECTION {
                let (px, py) = lerp(from, to, particle_progress(time, p));
                canvas.set_fill(&Paint::Solid(PARTICLE_COLOR));
                canvas.begin_path();
                canvas.arc(px, py, PARTICLE_RADIUS, 0.0, TAU);
                canvas.fill();
            }
        }
    }
}

fn draw_points<C: Canvas + ?Sized>(scene: &Scene, canvas: &mut C) {
    for point in scene.points() {
        let color = bit_color(point.bit);

        canvas.set_fill(&glow(point.x, point.y, color));
        canvas.begin_path();
        canvas.arc(point.x, point.y, GLOW_RADIUS, 0.0, TAU);
        canvas.fill();

        canvas.set_fill(&Paint::Solid(color));
        canvas.begin_path();
        canvas.arc(point.x, point.y, CORE_RADIUS, 0.0, TAU);
        canvas.fill();
    }
}

fn glow(x: f64, y: f64, color: Rgba) -> Paint {
    Paint::RadialGradient {
        x0: x,
        y0: y,
        r0: 0.0,
        x1: x,
        y1: y,
        r1: GLOW_RADIUS,
        stops: vec![
            ColorStop { offset: 0.0, color: color.with_alpha(GLOW_ALPHA) },
            ColorStop { offset: 1.0, color: Rgba::TRANSPARENT },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::generate_points;
    use crate::surface::{DrawCommand, DrawList};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup(binary: &str) -> (Scene, Viewport, DrawList) {
        let viewport = Viewport::new(500.0, 400.0);
        let mut rng = StdRng::seed_from_u64(1);
        let scene = Scene::new(generate_points(binary, &viewport, &mut rng));
        (scene, viewport, DrawList::new(viewport))
    }

    fn count(list: &DrawList, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        list.commands().iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn empty_scene_only_clears() {
        let (mut scene, viewport, mut list) = setup("");
        render_frame(&mut scene, &viewport, &RenderOptions::default(), &mut list);
        assert_eq!(
            list.commands(),
            &[DrawCommand::ClearRect { x: 0.0, y: 0.0, width: 500.0, height: 400.0 }]
        );
    }

    #[test]
    fn frame_draws_every_point_and_connection() {
        let binary = crate::codec::encode_text("ring");
        let (mut scene, viewport, mut list) = setup(&binary);
        render_frame(&mut scene, &viewport, &RenderOptions::default(), &mut list);

        let links = scene.connection_count();
        let n = scene.points().len();
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Stroke)), links);
        assert_eq!(
            count(&list, |c| matches!(c, DrawCommand::Fill)),
            links * PARTICLES_PER_CONNECTION + n * 2
        );
        let glows = count(&list, |c| {
            matches!(c, DrawCommand::Arc { radius, .. } if *radius == GLOW_RADIUS)
        });
        assert_eq!(glows, n);
    }

    #[test]
    fn stale_connection_index_is_skipped() {
        let viewport = Viewport::new(500.0, 400.0);
        let mut points = generate_points("10", &viewport, &mut StdRng::seed_from_u64(1));
        points[0].connections = vec![99];
        let mut scene = Scene::new(points);
        let mut list = DrawList::new(viewport);
        render_frame(&mut scene, &viewport, &RenderOptions::default(), &mut list);

        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Stroke)), 0);
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Fill)), 4);
    }

    #[test]
    fn points_use_bit_colours() {
        let (mut scene, viewport, mut list) = setup("10");
        render_frame(&mut scene, &viewport, &RenderOptions::default(), &mut list);
        let solids: Vec<Rgba> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SetFill(Paint::Solid(color)) => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(solids, vec![ONE_COLOR, ZERO_COLOR]);
    }

    #[test]
    fn glow_fades_to_transparent() {
        match glow(1.0, 2.0, ZERO_COLOR) {
            Paint::RadialGradient { r1, stops, .. } => {
                assert_eq!(r1, GLOW_RADIUS);
                assert_eq!(stops[0].color, Rgba::new(255, 45, 85, 0.3));
                assert_eq!(stops[1].color, Rgba::TRANSPARENT);
            }
            Paint::Solid(_) => panic!("expected gradient"),
        }
    }

    #[test]
    fn particles_sit_on_their_connection() {
        let binary = "1".repeat(40);
        let (mut scene, viewport, mut list) = setup(&binary);
        render_frame(&mut scene, &viewport, &RenderOptions::default(), &mut list);

        let p = &scene.points()[0];
        let q = &scene.points()[p.connections[0]];
        let t = particle_progress(scene.time(), 0);
        let expected = lerp((p.x, p.y), (q.x, q.y), t);
        let found = list.commands().iter().any(|c| {
            matches!(c, DrawCommand::Arc { x, y, radius, .. }
                if *radius == PARTICLE_RADIUS
                    && (x - expected.0).abs() < 1e-9
                    && (y - expected.1).abs() < 1e-9)
        });
        assert!(found);
    }

    #[test]
    fn optional_passes_add_commands() {
        let (mut scene, viewport, mut plain) = setup("0110");
        let mut decorated = plain.clone();
        let mut scene2 = scene.clone();
        render_frame(&mut scene, &viewport, &RenderOptions::default(), &mut plain);
        let options = RenderOptions {
            grid: true,
            post_effects: true,
            fractal_drift: false,
        };
        render_frame(&mut scene2, &viewport, &options, &mut decorated);
        assert!(decorated.commands().len() > plain.commands().len());
        assert!(matches!(
            decorated.commands().last(),
            Some(DrawCommand::FillRect { .. })
        ));
    }

    #[test]
    fn drift_moves_points_off_the_wave() {
        let (mut scene, viewport, mut list) = setup("01010101");
        let mut drifted = scene.clone();
        render_frame(&mut scene, &viewport, &RenderOptions::default(), &mut list);
        let options = RenderOptions {
            fractal_drift: true,
            ..RenderOptions::default()
        };
        render_frame(&mut drifted, &viewport, &options, &mut list);
        let moved = scene
            .points()
            .iter()
            .zip(drifted.points())
            .any(|(a, b)| (a.x - b.x).abs() > 1e-9 || (a.y - b.y).abs() > 1e-9);
        assert!(moved);
    }
}
