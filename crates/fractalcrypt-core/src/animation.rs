//! One cipher instance: codec front door, current scene, and its render loop.
//!
//! ```text
//!            start_animation            start_animation (cancel + restart)
//!   Idle ─────────────────────▶ Running ◀──────┐
//!    ▲                            │  └─────────┘
//!    └──────── cleanup ───────────┘
//! ```
//!
//! At most one frame callback is pending per instance. Every path that
//! requests a frame first cancels the previous handle.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::codec;
use crate::config::CipherConfig;
use crate::layout::{Viewport, generate_points};
use crate::render::{RenderOptions, render_frame};
use crate::scene::Scene;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Running,
}

impl std::fmt::Display for AnimationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
        }
    }
}

/// A cipher bound to a drawing surface and a frame scheduler.
pub struct FractalCipher<S: FrameScheduler, C: Surface> {
    config: CipherConfig,
    options: RenderOptions,
    surface: C,
    scheduler: S,
    viewport: Viewport,
    scene: Scene,
    rng: StdRng,
    state: AnimationState,
    pending: Option<FrameHandle>,
    frames: u64,
}

impl<S: FrameScheduler, C: Surface> FractalCipher<S, C> {
    /// Create an idle instance, measuring the surface once.
    ///
    /// `rng_seed` drives the per-point phases only; layout positions are
    /// fully deterministic.
    pub fn new(config: CipherConfig, mut surface: C, scheduler: S, rng_seed: u64) -> Self {
        let viewport = surface.fit();
        log::debug!(
            "cipher created: iterations={} seed={} viewport={}x{}",
            config.iterations,
            config.seed,
            viewport.width,
            viewport.height
        );
        Self {
            config,
            options: RenderOptions::default(),
            surface,
            scheduler,
            viewport,
            scene: Scene::default(),
            rng: StdRng::seed_from_u64(rng_seed),
            state: AnimationState::Idle,
            pending: None,
            frames: 0,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> CipherConfig {
        self.config
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &C {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut C {
        &mut self.surface
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Frames drawn since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Encode `text`, lay out its bits and (re)start the animation.
    ///
    /// Empty input returns an empty string and leaves the scene alone.
    pub fn encrypt(&mut self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let binary = codec::encode_text(text);
        self.load_scene(&binary);
        self.start_animation();
        binary
    }

    /// Lay out the digits of `binary`, (re)start the animation and decode it.
    ///
    /// The scene is built from the input as given, even when it does not
    /// decode cleanly.
    pub fn decrypt(&mut self, binary: &str) -> String {
        if binary.is_empty() {
            return String::new();
        }
        self.load_scene(binary);
        self.start_animation();
        codec::decode_binary(binary)
    }

    fn load_scene(&mut self, binary: &str) {
        let points = generate_points(binary, &self.viewport, &mut self.rng);
        self.scene = Scene::new(points);
        log::debug!(
            "scene built: {} points, {} connections",
            self.scene.points().len(),
            self.scene.connection_count()
        );
    }

    /// Cancel any frame in flight, draw one frame now and keep running.
    pub fn start_animation(&mut self) {
        self.cancel_pending();
        self.state = AnimationState::Running;
        self.tick();
    }

    /// Run one frame. Does nothing while idle.
    pub fn tick(&mut self) {
        if self.state != AnimationState::Running {
            return;
        }
        // The handle that brought us here has fired; forget it.
        self.pending = None;

        render_frame(&mut self.scene, &self.viewport, &self.options, &mut self.surface);
        self.frames += 1;

        self.pending = self.scheduler.schedule();
        if self.pending.is_none() {
            log::warn!("frame scheduler refused a callback; animation stopped");
            self.state = AnimationState::Idle;
        }
    }

    /// Stop the loop. Safe to call repeatedly.
    pub fn cleanup(&mut self) {
        self.cancel_pending();
        if self.state == AnimationState::Running {
            log::debug!("animation stopped after {} frames", self.frames);
        }
        self.state = AnimationState::Idle;
    }

    /// Re-measure the surface.
    ///
    /// Only the centre and radius used by future layouts change: the current
    /// scene keeps the positions it was built with until the next
    /// encrypt/decrypt.
    pub fn resize(&mut self) {
        self.viewport = self.surface.fit();
        log::debug!(
            "viewport resized to {}x{}",
            self.viewport.width,
            self.viewport.height
        );
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: FrameScheduler, C: Surface> Drop for FractalCipher<S, C> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::surface::DrawList;

    struct Refusing;

    impl FrameScheduler for Refusing {
        fn schedule(&mut self) -> Option<FrameHandle> {
            None
        }
        fn cancel(&mut self, _handle: FrameHandle) {}
    }

    fn cipher(scheduler: ManualScheduler) -> FractalCipher<ManualScheduler, DrawList> {
        let surface = DrawList::new(Viewport::new(800.0, 600.0));
        FractalCipher::new(CipherConfig::default(), surface, scheduler, 3)
    }

    #[test]
    fn starts_idle() {
        let c = cipher(ManualScheduler::new());
        assert_eq!(c.state(), AnimationState::Idle);
        assert!(c.scene().is_empty());
        assert_eq!(c.pending_frame(), None);
    }

    #[test]
    fn encrypt_returns_binary_and_runs() {
        let sched = ManualScheduler::new();
        let mut c = cipher(sched.clone());
        assert_eq!(c.encrypt("A"), "01000001");
        assert_eq!(c.state(), AnimationState::Running);
        assert_eq!(c.scene().points().len(), 8);
        assert_eq!(c.frames(), 1);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn decrypt_returns_text_and_lays_out_input() {
        let mut c = cipher(ManualScheduler::new());
        assert_eq!(c.decrypt("0100100001101001"), "Hi");
        assert_eq!(c.scene().points().len(), 16);
    }

    #[test]
    fn malformed_decrypt_still_animates() {
        let mut c = cipher(ManualScheduler::new());
        assert_eq!(c.decrypt("not binary"), codec::DECODE_ERROR_MESSAGE);
        assert_eq!(c.scene().points().len(), 10);
        assert_eq!(c.state(), AnimationState::Running);
    }

    #[test]
    fn empty_input_changes_nothing() {
        let sched = ManualScheduler::new();
        let mut c = cipher(sched.clone());
        assert_eq!(c.encrypt(""), "");
        assert_eq!(c.decrypt(""), "");
        assert_eq!(c.state(), AnimationState::Idle);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn restart_keeps_a_single_pending_frame() {
        let sched = ManualScheduler::new();
        let mut c = cipher(sched.clone());
        c.encrypt("one");
        c.encrypt("two");
        c.decrypt("01000001");
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn fired_frames_reschedule() {
        let sched = ManualScheduler::new();
        let mut c = cipher(sched.clone());
        c.encrypt("loop");
        for _ in 0..10 {
            assert!(sched.fire());
            c.tick();
        }
        assert_eq!(c.frames(), 11);
        assert_eq!(sched.pending(), 1);
        assert!((c.scene().time() - 0.11).abs() < 1e-9);
    }

    #[test]
    fn cleanup_cancels_and_idles() {
        let sched = ManualScheduler::new();
        let mut c = cipher(sched.clone());
        c.encrypt("stop");
        c.cleanup();
        assert_eq!(c.state(), AnimationState::Idle);
        assert_eq!(sched.pending(), 0);
        let frames = c.frames();
        c.tick();
        assert_eq!(c.frames(), frames);
        c.cleanup();
    }

    #[test]
    fn drop_cancels_pending_frame() {
        let sched = ManualScheduler::new();
        {
            let mut c = cipher(sched.clone());
            c.encrypt("gone");
        }
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn resize_keeps_existing_points() {
        let mut c = cipher(ManualScheduler::new());
        c.encrypt("ab");
        let before: Vec<(f64, f64)> = c
            .scene()
            .points()
            .iter()
            .map(|p| (p.original_x, p.original_y))
            .collect();

        c.surface_mut().set_viewport(Viewport::new(200.0, 200.0));
        c.resize();
        assert_eq!(c.viewport(), Viewport::new(200.0, 200.0));

        let after: Vec<(f64, f64)> = c
            .scene()
            .points()
            .iter()
            .map(|p| (p.original_x, p.original_y))
            .collect();
        assert_eq!(before, after);

        c.encrypt("ab");
        assert!((c.scene().points()[1].radius - 63.0).abs() < 1e-9);
    }

    #[test]
    fn refused_schedule_drops_to_idle() {
        let surface = DrawList::new(Viewport::new(100.0, 100.0));
        let mut c = FractalCipher::new(CipherConfig::default(), surface, Refusing, 0);
        c.encrypt("x");
        assert_eq!(c.state(), AnimationState::Idle);
        assert_eq!(c.frames(), 1);
    }

    #[test]
    fn frame_is_drawn_on_start() {
        let mut c = cipher(ManualScheduler::new());
        c.encrypt("A");
        assert!(c.surface().draw_call_count() > 0);
    }
}
