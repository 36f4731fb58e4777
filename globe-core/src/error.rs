use thiserror::Error;

//
// ──────────────────────────────────────────────────────────────
//   Startup errors
//
//   Everything here is fatal: the viewer never reaches the Ready
//   state. Once frames are flowing nothing in the core can fail.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
pub enum GlobeError
{
  #[error("failed to create rendering surface: {0}")]
  Surface(#[from] wgpu::CreateSurfaceError),

  #[error("no suitable GPU adapter found: {0}")]
  Adapter(#[from] wgpu::RequestAdapterError),

  #[error("failed to create GPU device: {0}")]
  Device(#[from] wgpu::RequestDeviceError),

  #[error("surface reports no supported formats for this adapter")]
  UnsupportedSurface,

  #[error("failed to decode globe image: {0}")]
  ImageDecode(#[from] image::ImageError),

  #[error("globe image is {width}x{height}, expected {expected_width}x{expected_height}")]
  ImageSize
  {
    width: u32,
    height: u32,
    expected_width: u32,
    expected_height: u32,
  },

  #[error("globe texture needs {required}px but the device allows {limit}px")]
  TextureTooLarge
  {
    required: u32,
    limit: u32,
  },

  #[error("unknown view mode `{0}` (expected `mercator` or `orbit`)")]
  UnknownMode(String),
}
