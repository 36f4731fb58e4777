use glam::Vec2;

use crate::input::{
  InputState, KEY_PITCH_DOWN, KEY_PITCH_UP, KEY_YAW_LEFT, KEY_YAW_RIGHT, KEY_ZOOM_IN, KEY_ZOOM_OUT,
};

//
// ──────────────────────────────────────────────────────────────
//   Camera state
//
//   The eye sits on a circle of `radius` around the globe's axis,
//   `height` above the equatorial plane, at `orbit_angle`. Pitch
//   and yaw tilt the view ray away from the centre.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState
{
  pub radius: f32,
  pub height: f32,
  pub orbit_angle: f32,
  pub pitch: f32,
  pub yaw: f32,
}

/// When the automatic orbit is allowed to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPolicy
{
  /// Orbit keeps turning until a pitch or yaw key is held.
  PauseOnOverride,
  /// Orbit turns only while no key whatsoever is held.
  IdleOnly,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraParams
{
  pub radius_min: f32,
  pub radius_max: f32,
  /// Radius change per second while a zoom key is held.
  pub zoom_rate: f32,
  /// Orbit advance in radians per second.
  pub rotation_rate: f32,
  pub policy: RotationPolicy,
}

//
// ──────────────────────────────────────────────────────────────
//   Held-key effect table
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy)]
enum Effect
{
  Zoom(f32),
  Pitch(f32),
  Yaw(f32),
}

impl Effect
{
  fn is_override(self) -> bool
  {
    matches!(self, Effect::Pitch(_) | Effect::Yaw(_))
  }
}

const KEY_EFFECTS: [(&str, Effect); 6] = [
  (KEY_ZOOM_IN, Effect::Zoom(-1.0)),
  (KEY_ZOOM_OUT, Effect::Zoom(1.0)),
  (KEY_PITCH_UP, Effect::Pitch(1.0)),
  (KEY_PITCH_DOWN, Effect::Pitch(-1.0)),
  (KEY_YAW_LEFT, Effect::Yaw(1.0)),
  (KEY_YAW_RIGHT, Effect::Yaw(-1.0)),
];

//
// ──────────────────────────────────────────────────────────────
//   CameraModel
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct CameraModel
{
  pub state: CameraState,
  pub params: CameraParams,
}

impl CameraModel
{
  pub fn new(params: CameraParams, initial: CameraState) -> Self
  {
    let mut state = initial;
    state.radius = state.radius.clamp(params.radius_min, params.radius_max);

    Self { state, params }
  }

  /// Advance by `dt` seconds under the keys currently held.
  ///
  /// Deltas from every held key are summed before they touch the
  /// state, so opposing keys cancel exactly instead of fighting the
  /// clamp.
  pub fn update(&mut self, input: &InputState, dt: f32)
  {
    let dt = dt.max(0.0);

    let mut zoom = 0.0;
    let mut pitch = 0.0;
    let mut yaw = 0.0;
    let mut overridden = false;

    for (key, effect) in KEY_EFFECTS
    {
      if !input.is_held(key)
      {
        continue;
      }

      overridden |= effect.is_override();

      match effect
      {
        Effect::Zoom(sign) => zoom += sign * self.params.zoom_rate * dt,
        Effect::Pitch(sign) => pitch += sign * dt,
        Effect::Yaw(sign) => yaw += sign * dt,
      }
    }

    let state = &mut self.state;
    state.radius = (state.radius + zoom).clamp(self.params.radius_min, self.params.radius_max);
    state.pitch += pitch;
    state.yaw += yaw;

    let rotate = match self.params.policy
    {
      RotationPolicy::PauseOnOverride => !overridden,
      RotationPolicy::IdleOnly => !input.any_held(),
    };

    if rotate
    {
      state.orbit_angle += self.params.rotation_rate * dt;
    }
  }

  /// Horizontal eye position: `radius * (cos θ, sin θ)`.
  pub fn orbit_position(&self) -> Vec2
  {
    Vec2::from_angle(self.state.orbit_angle) * self.state.radius
  }
}

#[cfg(test)]
mod tests
{
  use approx::assert_abs_diff_eq;

  use super::*;

  fn model(policy: RotationPolicy) -> CameraModel
  {
    let params =
      CameraParams { radius_min: 0.1, radius_max: 10.0, zoom_rate: 5.0, rotation_rate: 1.0, policy };
    let initial = CameraState { radius: 8.0, height: 2.0, orbit_angle: 0.0, pitch: 0.0, yaw: 0.0 };
    CameraModel::new(params, initial)
  }

  fn holding(keys: &[&str]) -> InputState
  {
    let mut input = InputState::new();
    for key in keys
    {
      input.on_key_change(key, true);
    }
    input
  }

  #[test]
  fn initial_radius_is_clamped_into_range()
  {
    let params = model(RotationPolicy::IdleOnly).params;
    let initial = CameraState { radius: 50.0, height: 0.0, orbit_angle: 0.0, pitch: 0.0, yaw: 0.0 };
    assert_eq!(CameraModel::new(params, initial).state.radius, 10.0);
  }

  #[test]
  fn zoom_keys_move_radius_at_zoom_rate()
  {
    let mut cam = model(RotationPolicy::PauseOnOverride);

    cam.update(&holding(&[KEY_ZOOM_IN]), 0.1);
    assert_abs_diff_eq!(cam.state.radius, 7.5, epsilon = 1e-6);

    cam.update(&holding(&[KEY_ZOOM_OUT]), 0.2);
    assert_abs_diff_eq!(cam.state.radius, 8.5, epsilon = 1e-6);
  }

  #[test]
  fn radius_never_leaves_its_range()
  {
    let mut cam = model(RotationPolicy::PauseOnOverride);

    for dt in [0.0, 0.016, 0.5, 3.0, 100.0]
    {
      cam.update(&holding(&[KEY_ZOOM_IN]), dt);
      assert!((0.1..=10.0).contains(&cam.state.radius));
    }
    assert_eq!(cam.state.radius, 0.1);

    for dt in [0.016, 7.0, 1e6]
    {
      cam.update(&holding(&[KEY_ZOOM_OUT]), dt);
      assert!((0.1..=10.0).contains(&cam.state.radius));
    }
    assert_eq!(cam.state.radius, 10.0);
  }

  #[test]
  fn opposing_zoom_keys_cancel_exactly()
  {
    let mut cam = model(RotationPolicy::IdleOnly);
    cam.state.radius = 0.12;

    cam.update(&holding(&[KEY_ZOOM_IN, KEY_ZOOM_OUT]), 0.037);
    assert_eq!(cam.state.radius, 0.12);
  }

  #[test]
  fn arrow_keys_accumulate_pitch_and_yaw_by_dt()
  {
    let mut cam = model(RotationPolicy::PauseOnOverride);
    let dt = 0.25;

    cam.update(&holding(&[KEY_PITCH_UP, KEY_YAW_RIGHT]), dt);
    assert_eq!(cam.state.pitch, dt);
    assert_eq!(cam.state.yaw, -dt);

    cam.update(&holding(&[KEY_PITCH_DOWN, KEY_YAW_LEFT]), dt);
    assert_eq!(cam.state.pitch, 0.0);
    assert_eq!(cam.state.yaw, 0.0);
  }

  #[test]
  fn pitch_and_yaw_are_unbounded()
  {
    let mut cam = model(RotationPolicy::PauseOnOverride);
    for _ in 0..10
    {
      cam.update(&holding(&[KEY_PITCH_UP]), 1.0);
    }
    assert_abs_diff_eq!(cam.state.pitch, 10.0, epsilon = 1e-6);
  }

  #[test]
  fn override_keys_pause_the_orbit()
  {
    for key in [KEY_PITCH_UP, KEY_PITCH_DOWN, KEY_YAW_LEFT, KEY_YAW_RIGHT]
    {
      let mut cam = model(RotationPolicy::PauseOnOverride);
      cam.state.orbit_angle = 1.5;

      cam.update(&holding(&[key]), 0.3);
      assert_eq!(cam.state.orbit_angle, 1.5, "{key} should pause the orbit");
    }
  }

  #[test]
  fn zoom_keys_do_not_pause_override_policy()
  {
    let mut cam = model(RotationPolicy::PauseOnOverride);

    cam.update(&holding(&[KEY_ZOOM_IN]), 0.5);
    assert_abs_diff_eq!(cam.state.orbit_angle, 0.5, epsilon = 1e-6);
  }

  #[test]
  fn idle_policy_stops_for_any_key()
  {
    for key in [KEY_ZOOM_IN, KEY_ZOOM_OUT, KEY_PITCH_UP, "x", "Shift"]
    {
      let mut cam = model(RotationPolicy::IdleOnly);
      cam.update(&holding(&[key]), 0.4);
      assert_eq!(cam.state.orbit_angle, 0.0, "{key} should stop the orbit");
    }
  }

  #[test]
  fn idle_policy_rotates_when_nothing_is_held()
  {
    let mut cam = model(RotationPolicy::IdleOnly);
    let mut input = holding(&[KEY_ZOOM_IN]);
    input.on_key_change(KEY_ZOOM_IN, false);

    cam.update(&input, 0.4);
    assert_abs_diff_eq!(cam.state.orbit_angle, 0.4, epsilon = 1e-6);
  }

  #[test]
  fn negative_dt_is_treated_as_zero()
  {
    let mut cam = model(RotationPolicy::PauseOnOverride);
    let before = cam.state;

    cam.update(&holding(&[KEY_ZOOM_OUT, KEY_PITCH_UP]), -1.0);
    assert_eq!(cam.state, before);
  }

  #[test]
  fn orbit_position_follows_angle_and_radius()
  {
    let mut cam = model(RotationPolicy::IdleOnly);
    assert_eq!(cam.orbit_position(), Vec2::new(8.0, 0.0));

    cam.state.orbit_angle = std::f32::consts::FRAC_PI_2;
    let pos = cam.orbit_position();
    assert_abs_diff_eq!(pos.x, 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(pos.y, 8.0, epsilon = 1e-5);
  }
}
