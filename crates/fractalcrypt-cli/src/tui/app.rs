//! TUI application state and event loop.
//!
//! The terminal stands in for the browser page: a [`DrawList`] is the
//! canvas, a [`ManualScheduler`] is the frame clock, and the loop fires one
//! pending frame per interval. Each drawn frame is handed to `ui` as a list
//! of recorded draw calls.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use rand::SeedableRng;
use rand::rngs::StdRng;

use fractalcrypt_core::{
    AnimationState, CipherConfig, Direction, DrawCommand, DrawList, Host, ManualScheduler,
    RenderOptions, Viewport,
};

/// Pixel size of one terminal cell. Cells are roughly twice as tall as wide.
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

const MIN_FPS: f64 = 1.0;
const MAX_FPS: f64 = 120.0;
const FPS_STEP: f64 = 5.0;

pub struct App {
    host: Host<ManualScheduler, DrawList>,
    scheduler: ManualScheduler,
    direction: Direction,
    input: String,
    output: String,
    fps: f64,
    frame_interval: Duration,
    running: bool,
    paused: bool,
    cells: (u16, u16),
}

impl App {
    pub fn new(input: &str, direction: Direction, fps: f64, options: RenderOptions) -> Self {
        let scheduler = ManualScheduler::new();
        let mut host = Host::new(
            scheduler.clone(),
            DrawList::new(Viewport::new(640.0, 480.0)),
            StdRng::from_rng(&mut rand::rng()),
        )
        .with_options(options);
        host.load();

        let fps = fps.clamp(MIN_FPS, MAX_FPS);
        Self {
            host,
            scheduler,
            direction,
            input: input.to_string(),
            output: String::new(),
            fps,
            frame_interval: Duration::from_secs_f64(1.0 / fps),
            running: true,
            paused: false,
            cells: (0, 0),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors for ui
    // -----------------------------------------------------------------------

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> AnimationState {
        self.host.state()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn options(&self) -> RenderOptions {
        self.host.options()
    }

    pub fn frames(&self) -> u64 {
        self.host.current().map_or(0, |c| c.frames())
    }

    pub fn time(&self) -> f64 {
        self.host.current().map_or(0.0, |c| c.scene().time())
    }

    pub fn point_count(&self) -> usize {
        self.host.current().map_or(0, |c| c.scene().points().len())
    }

    pub fn connection_count(&self) -> usize {
        self.host
            .current()
            .map_or(0, |c| c.scene().connection_count())
    }

    pub fn viewport(&self) -> Viewport {
        self.host
            .current()
            .map_or_else(|| Viewport::new(0.0, 0.0), |c| c.viewport())
    }

    /// Draw calls of the most recent frame.
    pub fn commands(&self) -> &[DrawCommand] {
        self.host
            .current()
            .map(|c| c.surface().commands())
            .unwrap_or(&[])
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Match the surface to a canvas area of `cols` x `rows` cells.
    /// Returns whether the size changed.
    pub fn fit(&mut self, cols: u16, rows: u16) -> bool {
        if self.cells == (cols, rows) {
            return false;
        }
        self.cells = (cols, rows);
        let viewport = Viewport::new(
            f64::from(cols.max(1)) * CELL_WIDTH,
            f64::from(rows.max(1)) * CELL_HEIGHT,
        );
        self.host.surface_mut().set_viewport(viewport);
        if let Some(cipher) = self.host.current_mut() {
            cipher.surface_mut().set_viewport(viewport);
        }
        self.host.resize();
        log::debug!("canvas resized to {cols}x{rows} cells");
        true
    }

    /// Run the entry point again on the input, laying the ring out afresh.
    pub fn restart(&mut self) {
        self.output = self
            .host
            .run(self.direction, &self.input, CipherConfig::default());
    }

    /// Deliver the pending frame, if any. Returns whether a frame was drawn.
    pub fn step(&mut self) -> bool {
        if self.scheduler.fire() {
            self.host.tick();
            true
        } else {
            false
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Restore the terminal before the panic message is printed.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        self.host.unload();
        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        self.fit_terminal(terminal)?;
        self.restart();
        let mut last_frame = Instant::now();

        while self.running {
            self.fit_terminal(terminal)?;
            terminal.draw(|f| super::ui::draw(f, self))?;

            let timeout = self
                .frame_interval
                .saturating_sub(last_frame.elapsed())
                .min(Duration::from_millis(50));
            if event::poll(timeout)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key.code);
            }

            if last_frame.elapsed() >= self.frame_interval {
                if !self.paused {
                    self.step();
                }
                last_frame = Instant::now();
            }
        }

        Ok(())
    }

    fn fit_terminal(
        &mut self,
        terminal: &Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let size = terminal.size()?;
        let canvas = super::ui::canvas_area(Rect::new(0, 0, size.width, size.height));
        self.fit(canvas.width, canvas.height);
        Ok(())
    }

    fn set_fps(&mut self, fps: f64) {
        self.fps = fps.clamp(MIN_FPS, MAX_FPS);
        self.frame_interval = Duration::from_secs_f64(1.0 / self.fps);
    }

    fn toggle(&mut self, change: impl FnOnce(&mut RenderOptions)) {
        let mut options = self.host.options();
        change(&mut options);
        self.host.set_options(options);
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char(' ') | KeyCode::Char('p') => self.paused = !self.paused,
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.set_fps(self.fps + FPS_STEP),
            KeyCode::Char('-') => self.set_fps(self.fps - FPS_STEP),
            KeyCode::Char('g') => self.toggle(|o| o.grid = !o.grid),
            KeyCode::Char('e') => self.toggle(|o| o.post_effects = !o.post_effects),
            KeyCode::Char('d') => self.toggle(|o| o.fractal_drift = !o.fractal_drift),
            _ => {}
        }
    }
}
