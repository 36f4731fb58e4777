use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::model::{CameraModel, CameraParams, CameraState, RotationPolicy};
use super::uniform::{PayloadLayout, MERCATOR_LAYOUT, ORBIT_LAYOUT};
use crate::error::GlobeError;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

// Orbit mode measures distance in globe radii.
const ORBIT_REFERENCE_RADIUS: f32 = 1.0;

const MERCATOR_SAMPLES: u32 = 4;
const ORBIT_SAMPLES: u32 = 1;

//
// ──────────────────────────────────────────────────────────────
//   ViewMode
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode
{
  /// Fixed-height auto orbit; arrow keys take over and pause it.
  #[default]
  Mercator,
  /// Adjustable distance; the orbit only turns while idle.
  #[serde(alias = "newton-vg")]
  Orbit,
}

impl ViewMode
{
  pub fn name(self) -> &'static str
  {
    match self
    {
      ViewMode::Mercator => "mercator",
      ViewMode::Orbit => "orbit",
    }
  }

  pub fn camera(self) -> CameraModel
  {
    match self
    {
      ViewMode::Mercator => CameraModel::new(
        CameraParams {
          radius_min: 0.1,
          radius_max: 10.0,
          zoom_rate: 5.0,
          rotation_rate: 1.0,
          policy: RotationPolicy::PauseOnOverride,
        },
        CameraState { radius: 8.0, height: 2.0, orbit_angle: 0.0, pitch: 0.0, yaw: 0.0 },
      ),

      ViewMode::Orbit =>
      {
        let r = ORBIT_REFERENCE_RADIUS;
        CameraModel::new(
          CameraParams {
            radius_min: 0.1 * r,
            radius_max: 10.0 * r,
            zoom_rate: 2.0 * r,
            rotation_rate: 0.5,
            policy: RotationPolicy::IdleOnly,
          },
          CameraState { radius: 3.0 * r, height: 0.5 * r, orbit_angle: 0.0, pitch: 0.0, yaw: 0.0 },
        )
      }
    }
  }

  pub fn layout(self) -> PayloadLayout
  {
    match self
    {
      ViewMode::Mercator => MERCATOR_LAYOUT,
      ViewMode::Orbit => ORBIT_LAYOUT,
    }
  }

  /// MSAA sample count the pipeline asks for.
  pub fn sample_count(self) -> u32
  {
    match self
    {
      ViewMode::Mercator => MERCATOR_SAMPLES,
      ViewMode::Orbit => ORBIT_SAMPLES,
    }
  }

  pub fn shader_source(self) -> &'static str
  {
    match self
    {
      ViewMode::Mercator => include_str!("../shaders/mercator.wgsl"),
      ViewMode::Orbit => include_str!("../shaders/orbit.wgsl"),
    }
  }
}

impl fmt::Display for ViewMode
{
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
  {
    f.write_str(self.name())
  }
}

impl FromStr for ViewMode
{
  type Err = GlobeError;

  fn from_str(s: &str) -> Result<Self, Self::Err>
  {
    match s
    {
      "mercator" => Ok(ViewMode::Mercator),
      "orbit" | "newton-vg" => Ok(ViewMode::Orbit),
      other => Err(GlobeError::UnknownMode(other.to_owned())),
    }
  }
}
