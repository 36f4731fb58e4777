//! Keyboard-driven globe viewer core.
//!
//! A single full-screen quad is drawn every frame; its fragment
//! shader ray-casts a textured sphere. Everything the shader needs
//! arrives in one seven-float uniform payload that the
//! [`FrameDriver`](frame::FrameDriver) rebuilds from keyboard state
//! and elapsed time on each tick.
//!
//! Two view modes share the pipeline and differ only in camera
//! parameters, rotation policy and payload field order; see
//! [`ViewMode`](camera::ViewMode).

pub mod camera;
pub mod error;
pub mod frame;
pub mod input;
pub mod renderer;
pub mod texture;

#[cfg(target_arch = "wasm32")]
mod web;

pub use camera::ViewMode;
pub use error::GlobeError;
pub use frame::{Frame, FrameDriver, FramePhase, Viewport};
pub use input::{InputState, KeyEvent, KeySender};
pub use renderer::Renderer;
pub use texture::EarthImage;
