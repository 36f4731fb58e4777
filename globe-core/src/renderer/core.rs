use super::resources::GpuResourceSet;
use super::targets::RenderTargets;
use crate::camera::{UniformPayload, ViewMode};
use crate::error::GlobeError;
use crate::frame::Viewport;
use crate::texture::EarthImage;

// Transparent so a premultiplied surface shows whatever is behind it.
const CLEAR_COLOUR: wgpu::Color = wgpu::Color { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

pub struct Renderer
{
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,

  targets: RenderTargets,
  resources: GpuResourceSet,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Renderer
{
  /// Acquire the GPU, configure the surface and build the resource
  /// set. Any failure here is fatal to startup.
  pub async fn new(
    target: impl Into<wgpu::SurfaceTarget<'static>>,
    size: Viewport,
    mode: ViewMode,
    image: &EarthImage,
  ) -> Result<Self, GlobeError>
  {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(target)?;

    let adapter = request_adapter(&instance, &surface).await?;
    let (device, queue) = request_device(&adapter).await?;

    let config = configure_surface(size, &surface, &adapter, &device)?;
    let sample_count = supported_sample_count(&adapter, config.format, mode.sample_count());
    log::info!("{mode} pipeline, {sample_count}x sampling");
    let targets = RenderTargets::create(&device, &config, sample_count);

    let resources =
      GpuResourceSet::create(&device, &queue, config.format, sample_count, mode, image)?;

    Ok(Self { surface, device, queue, config, targets, resources })
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.config.width = width;
    self.config.height = height;
    self.reconfigure();
    log::debug!("surface resized to {width}x{height}");
  }

  pub fn viewport(&self) -> Viewport
  {
    Viewport::new(self.config.width, self.config.height)
  }

  pub fn device(&self) -> &wgpu::Device
  {
    &self.device
  }

  pub fn surface_format(&self) -> wgpu::TextureFormat
  {
    self.config.format
  }

  pub fn render(&mut self, payload: &UniformPayload) -> Result<(), wgpu::SurfaceError>
  {
    self.render_with_overlay(payload, |_, _, _, _| {})
  }

  /// Upload the payload, draw the globe, then let `overlay` record
  /// extra passes onto the resolved swapchain view before submit.
  ///
  /// Lost or outdated swapchains are reconfigured and the frame is
  /// skipped; only unrecoverable errors are returned.
  pub fn render_with_overlay<F>(
    &mut self,
    payload: &UniformPayload,
    overlay: F,
  ) -> Result<(), wgpu::SurfaceError>
  where
    F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
  {
    let frame = match self.surface.get_current_texture()
    {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
      {
        log::debug!("swapchain lost, reconfiguring");
        self.reconfigure();
        return Ok(());
      }
      Err(wgpu::SurfaceError::Timeout) =>
      {
        log::warn!("timed out acquiring swapchain texture, skipping frame");
        return Ok(());
      }
      Err(err) => return Err(err),
    };

    self.resources.upload(&self.queue, payload);

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
      label: Some("Globe Encoder"),
    });

    record_globe_pass(&mut encoder, &view, &self.targets, &self.resources);
    overlay(&self.device, &self.queue, &mut encoder, &view);

    self.queue.submit(Some(encoder.finish()));
    frame.present();

    Ok(())
  }

  fn reconfigure(&mut self)
  {
    self.surface.configure(&self.device, &self.config);
    self.targets = RenderTargets::create(&self.device, &self.config, self.targets.sample_count);
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Initialization Helpers
// ──────────────────────────────────────────────────────────────
//

async fn request_adapter(
  instance: &wgpu::Instance,
  surface: &wgpu::Surface<'_>,
) -> Result<wgpu::Adapter, GlobeError>
{
  let adapter = instance
    .request_adapter(&wgpu::RequestAdapterOptions {
      power_preference: wgpu::PowerPreference::HighPerformance,
      compatible_surface: Some(surface),
      force_fallback_adapter: false,
    })
    .await?;

  let info = adapter.get_info();
  log::info!("using adapter {} ({:?})", info.name, info.backend);

  Ok(adapter)
}

async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue), GlobeError>
{
  // Downlevel limits keep WebGL working; the adapter's own texture
  // size limit is what lets the 5400px map through.
  let required_limits = wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());

  let device = adapter
    .request_device(&wgpu::DeviceDescriptor {
      label: Some("Globe Device"),
      required_features: wgpu::Features::empty(),
      required_limits,
      ..Default::default()
    })
    .await?;

  Ok(device)
}

fn configure_surface(
  size: Viewport,
  surface: &wgpu::Surface<'_>,
  adapter: &wgpu::Adapter,
  device: &wgpu::Device,
) -> Result<wgpu::SurfaceConfiguration, GlobeError>
{
  let caps = surface.get_capabilities(adapter);
  let format = *caps.formats.first().ok_or(GlobeError::UnsupportedSurface)?;

  let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied)
  {
    wgpu::CompositeAlphaMode::PreMultiplied
  }
  else
  {
    caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
  };

  let config = wgpu::SurfaceConfiguration {
    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    format,
    width: size.width.max(1),
    height: size.height.max(1),
    present_mode: wgpu::PresentMode::Fifo,
    alpha_mode,
    view_formats: vec![],
    desired_maximum_frame_latency: 2,
  };

  surface.configure(device, &config);
  log::info!("surface {format:?}, alpha {alpha_mode:?}, {}x{}", config.width, config.height);

  Ok(config)
}

fn supported_sample_count(adapter: &wgpu::Adapter, format: wgpu::TextureFormat, wanted: u32) -> u32
{
  if wanted <= 1
  {
    return 1;
  }

  let flags = adapter.get_texture_format_features(format).flags;
  if flags.sample_count_supported(wanted)
  {
    wanted
  }
  else
  {
    log::warn!("{wanted}x MSAA not supported for {format:?}, rendering without it");
    1
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Render Pass
// ──────────────────────────────────────────────────────────────
//

fn record_globe_pass(
  encoder: &mut wgpu::CommandEncoder,
  frame_view: &wgpu::TextureView,
  targets: &RenderTargets,
  resources: &GpuResourceSet,
)
{
  let (view, resolve_target) = targets.colour_attachment(frame_view);

  let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
    label: Some("Globe Render Pass"),
    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
      view,
      depth_slice: None,
      resolve_target,
      ops: wgpu::Operations { load: wgpu::LoadOp::Clear(CLEAR_COLOUR), store: wgpu::StoreOp::Store },
    })],
    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
      view: &targets.depth,
      depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
      stencil_ops: None,
    }),
    occlusion_query_set: None,
    timestamp_writes: None,
  });

  let quad = &resources.quad;
  pass.set_pipeline(&resources.pipeline);
  pass.set_bind_group(0, &resources.bind_group, &[]);
  pass.set_vertex_buffer(0, quad.vertex_buffer.slice(..));
  pass.set_index_buffer(quad.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
  pass.draw_indexed(0..quad.index_count, 0, 0..1);
}
