//! # fractalcrypt-core
//!
//! **Turn text into bits and watch them breathe.**
//!
//! `fractalcrypt-core` converts text to its binary representation and renders
//! the bits as glowing points on a ring, with neighbouring points joined by
//! lines that carry flowing particles. The "encryption" is a plain,
//! reversible text ↔ binary mapping; there is no secrecy involved.
//!
//! ## Quick Start
//!
//! ```
//! use fractalcrypt_core::{DrawList, FractalCipher, ManualScheduler, Viewport, CipherConfig};
//!
//! let scheduler = ManualScheduler::new();
//! let surface = DrawList::new(Viewport::new(800.0, 600.0));
//! let mut cipher = FractalCipher::new(CipherConfig::default(), surface, scheduler.clone(), 42);
//!
//! assert_eq!(cipher.encrypt("A"), "01000001");
//! assert_eq!(scheduler.pending(), 1);
//!
//! // Drive the loop by hand: each fired callback draws one frame.
//! scheduler.fire();
//! cipher.tick();
//! assert_eq!(cipher.frames(), 2);
//! ```
//!
//! ## Architecture
//!
//! Text → [`codec`] → binary digits → [`layout`] → points → [`Scene`] →
//! [`render`] → [`Canvas`]
//!
//! The render loop is not self-recursive. A [`FractalCipher`] asks its
//! [`FrameScheduler`] for one callback at a time and keeps the handle, so
//! restarting or cleaning up always cancels the frame in flight first.
//! [`Host`] owns the single live instance on behalf of a front-end.

pub mod animation;
pub mod codec;
pub mod config;
pub mod effects;
pub mod host;
pub mod layout;
pub mod render;
pub mod scene;
pub mod scheduler;
pub mod surface;

pub use animation::{AnimationState, FractalCipher};
pub use codec::{
    DECODE_ERROR_MESSAGE, DecodeError, decode_binary, encode_text, try_decode_binary,
};
pub use config::CipherConfig;
pub use host::{Direction, EMPTY_DECRYPT_MESSAGE, EMPTY_ENCRYPT_MESSAGE, Host};
pub use layout::{Bit, Point, Viewport, generate_points};
pub use render::{RenderOptions, render_frame};
pub use scene::{Scene, SceneSnapshot};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use surface::{Canvas, ColorStop, DrawCommand, DrawList, Paint, Rgba, Surface};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
