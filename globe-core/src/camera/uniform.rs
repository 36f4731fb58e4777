use super::model::CameraModel;
use crate::frame::Viewport;

//
// ──────────────────────────────────────────────────────────────
//   Uniform payload (GPU side)
//
//   Seven f32 scalars, uploaded verbatim every frame. The order is
//   per mode and must match the `Uniforms` struct of the mode's
//   WGSL shader, which declares the same seven fields as plain
//   f32s so there is no padding between them.
// ──────────────────────────────────────────────────────────────
//

pub const PAYLOAD_LEN: usize = 7;

/// Byte length of a packed payload.
pub const PAYLOAD_BYTES: u64 = (PAYLOAD_LEN * std::mem::size_of::<f32>()) as u64;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UniformPayload
{
  pub values: [f32; PAYLOAD_LEN],
}

const _: () = assert!(std::mem::size_of::<UniformPayload>() as u64 == PAYLOAD_BYTES);

impl UniformPayload
{
  pub fn as_bytes(&self) -> &[u8]
  {
    bytemuck::bytes_of(self)
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Layout descriptor
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadField
{
  ViewportWidth,
  ViewportHeight,
  Pitch,
  Yaw,
  /// `radius * cos(orbit_angle)`
  OrbitX,
  /// `radius * sin(orbit_angle)`
  OrbitY,
  Height,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLayout
{
  pub fields: [PayloadField; PAYLOAD_LEN],
  /// Smallest uniform buffer the shader side accepts, in bytes.
  pub min_buffer_size: u64,
}

/// `[width, height, alpha, beta, r·cos θ, r·sin θ, z]`
pub const MERCATOR_LAYOUT: PayloadLayout = PayloadLayout {
  fields: [
    PayloadField::ViewportWidth,
    PayloadField::ViewportHeight,
    PayloadField::Pitch,
    PayloadField::Yaw,
    PayloadField::OrbitX,
    PayloadField::OrbitY,
    PayloadField::Height,
  ],
  min_buffer_size: 0,
};

/// `[d·cos θ, d·sin θ, height, width, height_px, alpha, beta]`
pub const ORBIT_LAYOUT: PayloadLayout = PayloadLayout {
  fields: [
    PayloadField::OrbitX,
    PayloadField::OrbitY,
    PayloadField::Height,
    PayloadField::ViewportWidth,
    PayloadField::ViewportHeight,
    PayloadField::Pitch,
    PayloadField::Yaw,
  ],
  min_buffer_size: 32,
};

impl PayloadLayout
{
  pub fn pack(&self, camera: &CameraModel, viewport: Viewport) -> UniformPayload
  {
    let orbit = camera.orbit_position();
    let state = &camera.state;

    let values = self.fields.map(|field| match field
    {
      PayloadField::ViewportWidth => viewport.width as f32,
      PayloadField::ViewportHeight => viewport.height as f32,
      PayloadField::Pitch => state.pitch,
      PayloadField::Yaw => state.yaw,
      PayloadField::OrbitX => orbit.x,
      PayloadField::OrbitY => orbit.y,
      PayloadField::Height => state.height,
    });

    UniformPayload { values }
  }

  pub fn buffer_size(&self) -> u64
  {
    self.min_buffer_size.max(PAYLOAD_BYTES)
  }
}

#[cfg(test)]
mod tests
{
  use approx::assert_abs_diff_eq;

  use super::*;
  use crate::camera::ViewMode;

  const VIEWPORT: Viewport = Viewport { width: 800, height: 600 };

  #[test]
  fn mercator_packs_viewport_first()
  {
    let camera = ViewMode::Mercator.camera();
    let payload = MERCATOR_LAYOUT.pack(&camera, VIEWPORT);
    assert_eq!(payload.values, [800.0, 600.0, 0.0, 0.0, 8.0, 0.0, 2.0]);
  }

  #[test]
  fn orbit_packs_eye_position_first()
  {
    let mut camera = ViewMode::Orbit.camera();
    camera.state.pitch = 0.25;
    camera.state.yaw = -0.5;

    let payload = ORBIT_LAYOUT.pack(&camera, VIEWPORT);
    let distance = camera.state.radius;
    let height = camera.state.height;
    assert_eq!(payload.values, [distance, 0.0, height, 800.0, 600.0, 0.25, -0.5]);
  }

  #[test]
  fn orbit_angle_rotates_the_eye()
  {
    let mut camera = ViewMode::Mercator.camera();
    camera.state.orbit_angle = std::f32::consts::PI;

    let payload = MERCATOR_LAYOUT.pack(&camera, VIEWPORT);
    assert_abs_diff_eq!(payload.values[4], -8.0, epsilon = 1e-5);
    assert_abs_diff_eq!(payload.values[5], 0.0, epsilon = 1e-5);
  }

  #[test]
  fn payload_bytes_are_the_packed_floats()
  {
    let camera = ViewMode::Mercator.camera();
    let payload = MERCATOR_LAYOUT.pack(&camera, VIEWPORT);
    let bytes = payload.as_bytes();

    assert_eq!(bytes.len() as u64, PAYLOAD_BYTES);
    assert_eq!(&bytes[0..4], &800.0_f32.to_ne_bytes());
  }

  #[test]
  fn mercator_buffer_is_exactly_the_payload()
  {
    assert_eq!(MERCATOR_LAYOUT.buffer_size(), 28);
  }

  #[test]
  fn orbit_buffer_has_a_32_byte_floor()
  {
    assert_eq!(ORBIT_LAYOUT.buffer_size(), 32);
    assert_eq!(ORBIT_LAYOUT.buffer_size(), PAYLOAD_BYTES.max(32));
  }
}
