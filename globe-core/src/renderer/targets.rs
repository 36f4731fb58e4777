use wgpu::*;

pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth24Plus;

//
// ──────────────────────────────────────────────────────────────
//   Size-dependent attachments
//
//   Depth always; a multisampled colour target only when the
//   pipeline is multisampled. Both are rebuilt on resize.
// ──────────────────────────────────────────────────────────────
//

pub struct RenderTargets
{
  pub depth: TextureView,
  pub msaa: Option<TextureView>,
  pub sample_count: u32,
}

impl RenderTargets
{
  pub fn create(device: &Device, config: &SurfaceConfiguration, sample_count: u32) -> Self
  {
    let size = Extent3d { width: config.width, height: config.height, depth_or_array_layers: 1 };

    let depth = device
      .create_texture(&TextureDescriptor {
        label: Some("Depth Texture"),
        size,
        mip_level_count: 1,
        sample_count,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
      })
      .create_view(&TextureViewDescriptor::default());

    let msaa = (sample_count > 1).then(|| {
      device
        .create_texture(&TextureDescriptor {
          label: Some("MSAA Colour Texture"),
          size,
          mip_level_count: 1,
          sample_count,
          dimension: TextureDimension::D2,
          format: config.format,
          usage: TextureUsages::RENDER_ATTACHMENT,
          view_formats: &[],
        })
        .create_view(&TextureViewDescriptor::default())
    });

    Self { depth, msaa, sample_count }
  }

  /// (attachment view, resolve target) for this frame's swapchain view.
  pub fn colour_attachment<'a>(&'a self, frame: &'a TextureView) -> (&'a TextureView, Option<&'a TextureView>)
  {
    match &self.msaa
    {
      Some(msaa) => (msaa, Some(frame)),
      None => (frame, None),
    }
  }
}
