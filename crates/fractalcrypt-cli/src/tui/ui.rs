//! TUI rendering.
//!
//! ┌──────────────────────────────────────────────┐
//! │  ◎ fractalcrypt   encrypt  running  #128     │
//! ├──────────────────────────────────────────────┤
//! │              ·  ─  ◯  ─  ·                   │
//! │          ◯                 ◯                 │
//! │          ·       ring      ·                 │
//! │          ◯                 ◯                 │
//! │              ·  ─  ◯  ─  ·                   │
//! ├──────────────────────────────────────────────┤
//! │  01101000 01101001                           │
//! ├──────────────────────────────────────────────┤
//! │  space: pause   r: restart   +/-: speed      │
//! └──────────────────────────────────────────────┘
//!
//! The canvas replays the frame's recorded draw calls as braille shapes.
//! Terminal cells cannot blend, so translucent colours are darkened instead
//! and full-surface rectangle fills (scanlines, vignette) are skipped.

use std::rc::Rc;

use super::app::App;
use fractalcrypt_core::{DrawCommand, Rgba};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{self, Circle, Context, Points};
use ratatui::{prelude::*, widgets::*};

/// Filled arcs at or below this radius become single dots.
const DOT_RADIUS: f64 = 3.0;
/// Darkest a visible colour gets when its alpha is scaled in.
const MIN_BRIGHTNESS: f64 = 0.35;

pub fn draw(f: &mut Frame, app: &App) {
    let rows = split(f.area());

    draw_title(f, rows[0], app);
    draw_canvas(f, rows[1], app);
    draw_output(f, rows[2], app);
    draw_keys(f, rows[3]);
}

/// Inner area of the canvas block for a terminal of size `area`.
pub fn canvas_area(area: Rect) -> Rect {
    Block::bordered().inner(split(area)[1])
}

fn split(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(6),    // canvas
            Constraint::Length(3), // output
            Constraint::Length(1), // keys
        ])
        .split(area)
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let state = if app.is_paused() {
        "paused".to_string()
    } else {
        app.state().to_string()
    };
    let options = app.options();
    let flags: String = [
        (options.grid, " grid"),
        (options.post_effects, " fx"),
        (options.fractal_drift, " drift"),
    ]
    .iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| *name)
    .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" ◎ fractalcrypt ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(
                app.direction().to_string(),
                Style::default().bold().fg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::raw(state),
            Span::styled(
                format!(
                    "  #{}  t={:.2}  {} pts  {} links  {:.0} fps{flags} ",
                    app.frames(),
                    app.time(),
                    app.point_count(),
                    app.connection_count(),
                    app.fps(),
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    f.render_widget(block, area);
}

fn draw_canvas(f: &mut Frame, area: Rect, app: &App) {
    let viewport = app.viewport();
    let marks = marks(app.commands(), viewport.height);

    let widget = canvas::Canvas::default()
        .block(
            Block::bordered()
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" ring "),
        )
        .marker(Marker::Braille)
        .x_bounds([0.0, viewport.width])
        .y_bounds([0.0, viewport.height])
        .paint(|ctx| {
            for mark in &marks {
                mark.paint(ctx);
            }
        });
    f.render_widget(widget, area);
}

fn draw_output(f: &mut Frame, area: Rect, app: &App) {
    let output = Paragraph::new(app.output().to_string())
        .style(Style::default().fg(Color::Green))
        .block(
            Block::bordered()
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" output "),
        );
    f.render_widget(output, area);
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let keys = Line::from(vec![
        Span::styled(" space", Style::default().bold()),
        Span::raw(": pause  "),
        Span::styled("r", Style::default().bold()),
        Span::raw(": restart  "),
        Span::styled("+/-", Style::default().bold()),
        Span::raw(": speed  "),
        Span::styled("g/e/d", Style::default().bold()),
        Span::raw(": grid/fx/drift  "),
        Span::styled("q", Style::default().bold()),
        Span::raw(": quit"),
    ]);
    f.render_widget(Paragraph::new(keys).style(Style::default().fg(Color::DarkGray)), area);
}

// ---------------------------------------------------------------------------
// Draw calls → canvas shapes
// ---------------------------------------------------------------------------

/// One shape on the terminal canvas, in y-up canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mark {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
    Dot {
        x: f64,
        y: f64,
        color: Color,
    },
}

impl Mark {
    fn paint(&self, ctx: &mut Context<'_>) {
        match *self {
            Self::Line {
                x1,
                y1,
                x2,
                y2,
                color,
            } => ctx.draw(&canvas::Line::new(x1, y1, x2, y2, color)),
            Self::Circle {
                x,
                y,
                radius,
                color,
            } => ctx.draw(&Circle {
                x,
                y,
                radius,
                color,
            }),
            Self::Dot { x, y, color } => ctx.draw(&Points {
                coords: &[(x, y)],
                color,
            }),
        }
    }
}

#[derive(Clone, Copy)]
enum Segment {
    Move(f64, f64),
    Line(f64, f64),
    Arc(f64, f64, f64),
}

/// Replay recorded draw calls as canvas shapes.
///
/// `height` is the surface height, used to flip the y axis.
pub fn marks(commands: &[DrawCommand], height: f64) -> Vec<Mark> {
    let mut marks = Vec::new();
    let mut stroke = Rgba::TRANSPARENT;
    let mut fill = Rgba::TRANSPARENT;
    let mut path: Vec<Segment> = Vec::new();
    let flip = |y: f64| height - y;

    for command in commands {
        match command {
            DrawCommand::SetStrokeColor(c) => stroke = *c,
            DrawCommand::SetFill(paint) => fill = paint.primary_color(),
            DrawCommand::BeginPath => path.clear(),
            DrawCommand::MoveTo { x, y } => path.push(Segment::Move(*x, *y)),
            DrawCommand::LineTo { x, y } => path.push(Segment::Line(*x, *y)),
            DrawCommand::Arc { x, y, radius, .. } => path.push(Segment::Arc(*x, *y, *radius)),
            DrawCommand::Stroke => {
                let Some(color) = terminal_color(stroke) else {
                    continue;
                };
                let mut cursor = None;
                for segment in &path {
                    match *segment {
                        Segment::Move(x, y) => cursor = Some((x, y)),
                        Segment::Line(x, y) => {
                            if let Some((x0, y0)) = cursor {
                                marks.push(Mark::Line {
                                    x1: x0,
                                    y1: flip(y0),
                                    x2: x,
                                    y2: flip(y),
                                    color,
                                });
                            }
                            cursor = Some((x, y));
                        }
                        Segment::Arc(x, y, radius) => {
                            marks.push(Mark::Circle {
                                x,
                                y: flip(y),
                                radius,
                                color,
                            });
                            cursor = None;
                        }
                    }
                }
            }
            DrawCommand::Fill => {
                let Some(color) = terminal_color(fill) else {
                    continue;
                };
                for segment in &path {
                    if let Segment::Arc(x, y, radius) = *segment {
                        let y = flip(y);
                        marks.push(if radius <= DOT_RADIUS {
                            Mark::Dot { x, y, color }
                        } else {
                            Mark::Circle {
                                x,
                                y,
                                radius,
                                color,
                            }
                        });
                    }
                }
            }
            DrawCommand::ClearRect { .. }
            | DrawCommand::FillRect { .. }
            | DrawCommand::SetLineWidth(_) => {}
        }
    }
    marks
}

/// Opaque terminal colour for `c`, darkened by its alpha. `None` if invisible.
fn terminal_color(c: Rgba) -> Option<Color> {
    if c.a <= 0.0 {
        return None;
    }
    let k = c.a.clamp(MIN_BRIGHTNESS, 1.0);
    let scale = |v: u8| (f64::from(v) * k).round() as u8;
    Some(Color::Rgb(scale(c.r), scale(c.g), scale(c.b)))
}
