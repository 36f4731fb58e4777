mod mode;
mod model;
mod uniform;

pub use mode::ViewMode;
pub use model::{CameraModel, CameraParams, CameraState, RotationPolicy};
pub use uniform::{
  PayloadField, PayloadLayout, UniformPayload, MERCATOR_LAYOUT, ORBIT_LAYOUT, PAYLOAD_BYTES,
  PAYLOAD_LEN,
};
