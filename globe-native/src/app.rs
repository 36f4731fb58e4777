use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use globe_core::{EarthImage, FrameDriver, KeySender, Renderer, Viewport};
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::WindowEvent,
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  window::{Window, WindowId},
};

use crate::config::ViewerConfig;
use crate::gui::{Hud, HudSnapshot};
use crate::input::forward_key_event;

pub fn run(config: ViewerConfig) -> Result<()>
{
  // The image is part of startup: a bad file never opens a window.
  let image = load_image(&config)?;

  let event_loop = EventLoop::new()?;
  let mut app = GlobeApp::new(config, image);

  event_loop.run_app(&mut app)?;

  match app.init_error.take()
  {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

fn load_image(config: &ViewerConfig) -> Result<EarthImage>
{
  let path = &config.image_path;
  let bytes = std::fs::read(path).with_context(|| format!("reading globe image {}", path.display()))?;
  let image =
    EarthImage::decode(&bytes).with_context(|| format!("decoding globe image {}", path.display()))?;

  log::info!("loaded {} ({}x{})", path.display(), image.width, image.height);
  Ok(image)
}

struct GlobeApp
{
  config: ViewerConfig,
  image: EarthImage,

  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,
  hud: Option<Hud>,

  driver: FrameDriver,
  keys: KeySender,
  started: Instant,

  init_error: Option<anyhow::Error>,
}

impl GlobeApp
{
  fn new(config: ViewerConfig, image: EarthImage) -> Self
  {
    let (driver, keys) = FrameDriver::new(config.mode);

    Self {
      config,
      image,
      window: None,
      renderer: None,
      hud: None,
      driver,
      keys,
      started: Instant::now(),
      init_error: None,
    }
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop) -> Result<()>
  {
    if self.window.is_some()
    {
      return Ok(());
    }

    let window_config = &self.config.window;
    let title = format!("{} ({})", window_config.title, self.config.mode);
    let attrs = Window::default_attributes()
      .with_title(title)
      .with_inner_size(LogicalSize::new(window_config.width, window_config.height));
    let window = Arc::new(event_loop.create_window(attrs)?);

    let size = window.inner_size();
    let renderer = pollster::block_on(Renderer::new(
      window.clone(),
      Viewport::new(size.width, size.height),
      self.config.mode,
      &self.image,
    ))
    .context("initialising GPU renderer")?;

    if self.config.show_hud
    {
      self.hud = Some(Hud::new(renderer.device(), renderer.surface_format(), &window));
    }

    self.driver.mark_ready();
    log::info!("{} mode ready", self.config.mode);

    window.request_redraw();
    self.window = Some(window);
    self.renderer = Some(renderer);

    Ok(())
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let window = match &self.window
    {
      Some(w) if w.id() == window_id => w.clone(),
      _ => return,
    };

    if let Some(hud) = &mut self.hud
    {
      hud.handle_event(&window, &event);
    }

    if forward_key_event(&event, &self.keys)
    {
      return;
    }

    match event
    {
      WindowEvent::CloseRequested =>
      {
        elwt.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }

        window.request_redraw();
      }

      WindowEvent::RedrawRequested =>
      {
        if let Err(err) = self.frame(&window)
        {
          log::error!("{err}");
          elwt.exit();
        }
      }

      _ =>
      {}
    }
  }

  fn frame(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError>
  {
    let Some(renderer) = &mut self.renderer
    else
    {
      return Ok(());
    };

    let now = self.started.elapsed().as_secs_f64();
    let Some(frame) = self.driver.tick(now, renderer.viewport())
    else
    {
      return Ok(());
    };

    match &mut self.hud
    {
      Some(hud) =>
      {
        hud.record_frame_time(frame.dt);
        let snapshot = HudSnapshot::from_driver(&self.driver);

        renderer.render_with_overlay(&frame.payload, |device, queue, encoder, view| {
          hud.render(device, queue, encoder, window, view, &snapshot);
        })
      }
      None => renderer.render(&frame.payload),
    }
  }
}

impl ApplicationHandler for GlobeApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Wait);

    if let Err(err) = self.init_window_and_renderer(event_loop)
    {
      self.init_error = Some(err);
      event_loop.exit();
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop)
  {
    // One tick per display refresh: Fifo presentation paces the loop.
    if let Some(window) = &self.window
    {
      window.request_redraw();
    }
  }
}
