//! Host session: owns the single live cipher instance.
//!
//! Front-ends (the browser page, the terminal UI) hold one [`Host`]. Every
//! encrypt/decrypt builds a fresh [`FractalCipher`] with the clamped form
//! parameters; the previous instance is cleaned up before it is replaced so
//! its loop can never keep running in the background.

use rand::Rng;
use rand::rngs::StdRng;

use crate::animation::{AnimationState, FractalCipher};
use crate::config::CipherConfig;
use crate::render::RenderOptions;
use crate::scheduler::FrameScheduler;
use crate::surface::Surface;

pub const EMPTY_ENCRYPT_MESSAGE: &str = "Please enter text to encrypt";
pub const EMPTY_DECRYPT_MESSAGE: &str = "Please enter text to decrypt";

/// Which codec direction an entry point runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encrypt => write!(f, "encrypt"),
            Self::Decrypt => write!(f, "decrypt"),
        }
    }
}

/// Owner of at most one cipher instance.
///
/// `S` and `C` are cloned into each new instance, so both should be cheap
/// handles onto the real scheduler and drawing surface.
pub struct Host<S: FrameScheduler + Clone, C: Surface + Clone> {
    scheduler: S,
    surface: C,
    options: RenderOptions,
    rng: StdRng,
    current: Option<FractalCipher<S, C>>,
}

impl<S: FrameScheduler + Clone, C: Surface + Clone> Host<S, C> {
    pub fn new(scheduler: S, surface: C, rng: StdRng) -> Self {
        Self {
            scheduler,
            surface,
            options: RenderOptions::default(),
            rng,
            current: None,
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Change the effects used by the live instance and every later one.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
        if let Some(cipher) = self.current.as_mut() {
            cipher.set_options(options);
        }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// The surface template cloned into each new instance.
    pub fn surface_mut(&mut self) -> &mut C {
        &mut self.surface
    }

    pub fn current(&self) -> Option<&FractalCipher<S, C>> {
        self.current.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut FractalCipher<S, C>> {
        self.current.as_mut()
    }

    pub fn state(&self) -> AnimationState {
        self.current
            .as_ref()
            .map_or(AnimationState::Idle, FractalCipher::state)
    }

    /// Page load: install an idle instance with default parameters.
    pub fn load(&mut self) {
        self.replace(CipherConfig::default());
    }

    /// Encrypt entry point. `iterations` and `seed` are raw form text.
    pub fn encrypt(&mut self, input: &str, iterations: &str, seed: &str) -> String {
        self.run(Direction::Encrypt, input, CipherConfig::from_fields(iterations, seed))
    }

    /// Decrypt entry point. `iterations` and `seed` are raw form text.
    pub fn decrypt(&mut self, input: &str, iterations: &str, seed: &str) -> String {
        self.run(Direction::Decrypt, input, CipherConfig::from_fields(iterations, seed))
    }

    /// Run `direction` on `input` with an already-parsed config.
    pub fn run(&mut self, direction: Direction, input: &str, config: CipherConfig) -> String {
        if input.is_empty() {
            return match direction {
                Direction::Encrypt => EMPTY_ENCRYPT_MESSAGE,
                Direction::Decrypt => EMPTY_DECRYPT_MESSAGE,
            }
            .to_string();
        }

        log::debug!("{direction}: {} chars", input.chars().count());
        let cipher = self.replace(config);
        match direction {
            Direction::Encrypt => cipher.encrypt(input),
            Direction::Decrypt => cipher.decrypt(input),
        }
    }

    /// Deliver a due frame callback to the live instance.
    pub fn tick(&mut self) {
        if let Some(cipher) = self.current.as_mut() {
            cipher.tick();
        }
    }

    /// Window resize: re-measure the surface.
    pub fn resize(&mut self) {
        if let Some(cipher) = self.current.as_mut() {
            cipher.resize();
        }
    }

    /// Page unload: stop the loop.
    pub fn unload(&mut self) {
        if let Some(cipher) = self.current.as_mut() {
            cipher.cleanup();
        }
    }

    fn replace(&mut self, config: CipherConfig) -> &mut FractalCipher<S, C> {
        if let Some(mut old) = self.current.take() {
            old.cleanup();
        }
        let cipher = FractalCipher::new(
            config,
            self.surface.clone(),
            self.scheduler.clone(),
            self.rng.random(),
        )
        .with_options(self.options);
        self.current.insert(cipher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use crate::scheduler::ManualScheduler;
    use crate::surface::DrawList;
    use rand::SeedableRng;

    fn host(sched: &ManualScheduler) -> Host<ManualScheduler, DrawList> {
        Host::new(
            sched.clone(),
            DrawList::new(Viewport::new(640.0, 480.0)),
            StdRng::seed_from_u64(11),
        )
    }

    #[test]
    fn load_installs_idle_default_instance() {
        let sched = ManualScheduler::new();
        let mut h = host(&sched);
        assert!(h.current().is_none());
        h.load();
        let c = h.current().unwrap();
        assert_eq!(c.config(), CipherConfig::default());
        assert_eq!(h.state(), AnimationState::Idle);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn empty_input_yields_prompt() {
        let sched = ManualScheduler::new();
        let mut h = host(&sched);
        assert_eq!(h.encrypt("", "5", "42"), EMPTY_ENCRYPT_MESSAGE);
        assert_eq!(h.decrypt("", "5", "42"), EMPTY_DECRYPT_MESSAGE);
        assert!(h.current().is_none());
    }

    #[test]
    fn entry_points_clamp_parameters() {
        let sched = ManualScheduler::new();
        let mut h = host(&sched);
        assert_eq!(h.encrypt("A", "50", "-3"), "01000001");
        let c = h.current().unwrap();
        assert_eq!(c.config(), CipherConfig { iterations: 20, seed: 1 });
    }

    #[test]
    fn repeated_calls_leave_one_loop() {
        let sched = ManualScheduler::new();
        let mut h = host(&sched);
        h.load();
        h.encrypt("first", "5", "42");
        h.decrypt("0110000101100010", "5", "42");
        h.encrypt("third", "", "");
        assert_eq!(sched.pending(), 1);
        assert_eq!(h.state(), AnimationState::Running);
    }

    #[test]
    fn tick_drives_live_instance() {
        let sched = ManualScheduler::new();
        let mut h = host(&sched);
        h.encrypt("tick", "5", "42");
        assert!(sched.fire());
        h.tick();
        assert_eq!(h.current().unwrap().frames(), 2);
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn unload_stops_loop() {
        let sched = ManualScheduler::new();
        let mut h = host(&sched);
        h.encrypt("bye", "5", "42");
        h.unload();
        assert_eq!(sched.pending(), 0);
        assert_eq!(h.state(), AnimationState::Idle);
    }

    #[test]
    fn resize_without_instance_is_harmless() {
        let sched = ManualScheduler::new();
        let mut h = host(&sched);
        h.resize();
        h.unload();
        h.tick();
        assert!(h.current().is_none());
    }

    #[test]
    fn set_options_reaches_live_instance() {
        let sched = ManualScheduler::new();
        let mut h = host(&sched);
        h.encrypt("live", "5", "42");
        let options = RenderOptions {
            post_effects: true,
            ..RenderOptions::default()
        };
        h.set_options(options);
        assert_eq!(h.options(), options);
        assert_eq!(h.current().unwrap().options(), options);
    }

    #[test]
    fn surface_template_feeds_next_instance() {
        let sched = ManualScheduler::new();
        let mut h = host(&sched);
        h.surface_mut().set_viewport(Viewport::new(100.0, 100.0));
        h.encrypt("z", "5", "42");
        assert_eq!(h.current().unwrap().viewport(), Viewport::new(100.0, 100.0));
    }

    #[test]
    fn options_propagate_to_new_instances() {
        let sched = ManualScheduler::new();
        let options = RenderOptions {
            grid: true,
            ..RenderOptions::default()
        };
        let mut h = host(&sched).with_options(options);
        h.encrypt("g", "5", "42");
        assert_eq!(h.current().unwrap().options(), options);
    }
}
