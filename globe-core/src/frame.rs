use crate::camera::{CameraModel, PayloadLayout, UniformPayload, ViewMode};
use crate::input::{key_channel, InputState, KeyQueue, KeySender};

//
// ──────────────────────────────────────────────────────────────
//   Viewport (physical pixels)
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport
{
  pub width: u32,
  pub height: u32,
}

impl Viewport
{
  pub fn new(width: u32, height: u32) -> Self
  {
    Self { width, height }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   FrameClock
//
//   The previous timestamp starts at +∞ so the first delta comes
//   out negative and clamps to zero.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy)]
pub struct FrameClock
{
  last: f64,
}

impl Default for FrameClock
{
  fn default() -> Self
  {
    Self { last: f64::INFINITY }
  }
}

impl FrameClock
{
  /// Seconds since the previous call, never negative. `now` is any
  /// monotonic timestamp in seconds.
  pub fn delta(&mut self, now: f64) -> f32
  {
    // f64::max ignores NaN, so a bogus timestamp also yields 0.
    let dt = (now - self.last).max(0.0);
    self.last = now;
    dt as f32
  }
}

//
// ──────────────────────────────────────────────────────────────
//   FrameDriver
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase
{
  /// GPU resources do not exist yet; ticks produce nothing.
  Uninitialized,
  /// Resources are up, no frame has been produced.
  Ready,
  Rendering,
}

/// What one tick hands to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame
{
  pub dt: f32,
  pub payload: UniformPayload,
}

#[derive(Debug)]
pub struct FrameDriver
{
  mode: ViewMode,
  phase: FramePhase,
  clock: FrameClock,
  camera: CameraModel,
  layout: PayloadLayout,
  input: InputState,
  keys: KeyQueue,
}

impl FrameDriver
{
  /// New driver in the `Uninitialized` phase, plus the sender that
  /// keyboard sources push into.
  pub fn new(mode: ViewMode) -> (Self, KeySender)
  {
    let (sender, keys) = key_channel();

    let driver = Self {
      mode,
      phase: FramePhase::Uninitialized,
      clock: FrameClock::default(),
      camera: mode.camera(),
      layout: mode.layout(),
      input: InputState::new(),
      keys,
    };

    (driver, sender)
  }

  /// Call once the GPU resource set has been built.
  pub fn mark_ready(&mut self)
  {
    if self.phase == FramePhase::Uninitialized
    {
      self.phase = FramePhase::Ready;
    }
  }

  /// One frame: drain keys, advance the camera, pack the uniforms.
  pub fn tick(&mut self, now: f64, viewport: Viewport) -> Option<Frame>
  {
    if self.phase == FramePhase::Uninitialized
    {
      return None;
    }

    let dt = self.clock.delta(now);

    self.keys.drain_into(&mut self.input);
    self.camera.update(&self.input, dt);

    let payload = self.layout.pack(&self.camera, viewport);
    self.phase = FramePhase::Rendering;

    Some(Frame { dt, payload })
  }

  pub fn mode(&self) -> ViewMode
  {
    self.mode
  }

  pub fn phase(&self) -> FramePhase
  {
    self.phase
  }

  pub fn camera(&self) -> &CameraModel
  {
    &self.camera
  }

  pub fn input(&self) -> &InputState
  {
    &self.input
  }
}
