use crate::error::GlobeError;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

pub const EARTH_TEXTURE_WIDTH: u32 = 5400;
pub const EARTH_TEXTURE_HEIGHT: u32 = 2700;

// Colour data, so sampling returns linear values.
pub const EARTH_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

const BYTES_PER_PIXEL: u32 = 4;

//
// ──────────────────────────────────────────────────────────────
//   EarthImage (CPU side)
// ──────────────────────────────────────────────────────────────
//

/// Decoded equirectangular world map, tightly packed RGBA8 rows.
pub struct EarthImage
{
  pub width: u32,
  pub height: u32,
  pub rgba: Vec<u8>,
}

impl EarthImage
{
  /// Decode any format the `image` crate understands.
  pub fn decode(bytes: &[u8]) -> Result<Self, GlobeError>
  {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();

    if width != EARTH_TEXTURE_WIDTH || height != EARTH_TEXTURE_HEIGHT
    {
      return Err(GlobeError::ImageSize {
        width,
        height,
        expected_width: EARTH_TEXTURE_WIDTH,
        expected_height: EARTH_TEXTURE_HEIGHT,
      });
    }

    Ok(Self { width, height, rgba: rgba.into_raw() })
  }

  fn extent(&self) -> wgpu::Extent3d
  {
    wgpu::Extent3d { width: self.width, height: self.height, depth_or_array_layers: 1 }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   EarthTexture (GPU side)
// ──────────────────────────────────────────────────────────────
//

pub struct EarthTexture
{
  // Owned so the view stays valid for the session.
  _texture: wgpu::Texture,
  pub view: wgpu::TextureView,
}

impl EarthTexture
{
  pub fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    image: &EarthImage,
  ) -> Result<Self, GlobeError>
  {
    let limit = device.limits().max_texture_dimension_2d;
    if image.width > limit
    {
      return Err(GlobeError::TextureTooLarge { required: image.width, limit });
    }

    let texture = device.create_texture(&wgpu::TextureDescriptor {
      label: Some("Earth Texture"),
      size: image.extent(),
      mip_level_count: 1,
      sample_count: 1,
      dimension: wgpu::TextureDimension::D2,
      format: EARTH_TEXTURE_FORMAT,
      usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
      view_formats: &[],
    });

    queue.write_texture(
      wgpu::TexelCopyTextureInfo {
        texture: &texture,
        mip_level: 0,
        origin: wgpu::Origin3d::ZERO,
        aspect: wgpu::TextureAspect::All,
      },
      &image.rgba,
      wgpu::TexelCopyBufferLayout {
        offset: 0,
        bytes_per_row: Some(image.width * BYTES_PER_PIXEL),
        rows_per_image: Some(image.height),
      },
      image.extent(),
    );

    log::info!("uploaded {}x{} globe texture", image.width, image.height);

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    Ok(Self { _texture: texture, view })
  }
}

#[cfg(test)]
mod tests
{
  use std::io::Cursor;

  use super::*;

  fn png_bytes(width: u32, height: u32) -> Vec<u8>
  {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
  }

  #[test]
  fn rejects_images_of_the_wrong_size()
  {
    let err = EarthImage::decode(&png_bytes(4, 2)).err().unwrap();
    assert!(matches!(
      err,
      GlobeError::ImageSize { width: 4, height: 2, expected_width: 5400, expected_height: 2700 }
    ));
  }

  #[test]
  fn rejects_bytes_that_are_not_an_image()
  {
    let err = EarthImage::decode(b"definitely not a jpeg").err().unwrap();
    assert!(matches!(err, GlobeError::ImageDecode(_)));
  }

  #[test]
  fn decodes_a_full_size_map()
  {
    let map = EarthImage::decode(&png_bytes(EARTH_TEXTURE_WIDTH, EARTH_TEXTURE_HEIGHT)).unwrap();
    assert_eq!(map.width, EARTH_TEXTURE_WIDTH);
    assert_eq!(map.height, EARTH_TEXTURE_HEIGHT);
    assert_eq!(map.rgba.len(), (EARTH_TEXTURE_WIDTH * EARTH_TEXTURE_HEIGHT * 4) as usize);
    assert_eq!(&map.rgba[0..4], &[10, 20, 30, 255]);
  }
}
