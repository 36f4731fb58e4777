use egui_wgpu::{Renderer, RendererOptions, ScreenDescriptor};
use egui_winit::State;
use globe_core::{FrameDriver, ViewMode};
use winit::event::WindowEvent;
use winit::window::Window;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

// 5% new sample, 95% history
const FPS_SMOOTHING: f32 = 0.05;

const KEY_HELP: [(&str, &str); 3] = [("W / S", "zoom"), ("Up / Down", "pitch"), ("Left / Right", "yaw")];

//
// ──────────────────────────────────────────────────────────────
//   HUD snapshot
//
//   Copied out of the frame driver so the egui closure borrows
//   nothing from the app.
// ──────────────────────────────────────────────────────────────
//

pub struct HudSnapshot
{
  mode: ViewMode,
  radius: f32,
  orbit_angle: f32,
  pitch: f32,
  yaw: f32,
  held: String,
}

impl HudSnapshot
{
  pub fn from_driver(driver: &FrameDriver) -> Self
  {
    let state = driver.camera().state;

    Self {
      mode: driver.mode(),
      radius: state.radius,
      orbit_angle: state.orbit_angle,
      pitch: state.pitch,
      yaw: state.yaw,
      held: driver.input().held_keys().join(" "),
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Hud
// ──────────────────────────────────────────────────────────────
//

pub struct Hud
{
  context: egui::Context,
  state: State,
  renderer: Renderer,
  fps: f32,
}

impl Hud
{
  pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self
  {
    let context = egui::Context::default();
    let state = State::new(
      context.clone(),
      egui::viewport::ViewportId::ROOT,
      window,
      Some(window.scale_factor() as f32),
      None,
      None,
    );

    // Drawn onto the resolved swapchain view: no depth, no MSAA.
    let renderer = Renderer::new(
      device,
      output_format,
      RendererOptions {
        depth_stencil_format: None,
        msaa_samples: 1,
        predictable_texture_filtering: false,
        dithering: true,
      },
    );

    Self { context, state, renderer, fps: 60.0 }
  }

  pub fn handle_event(&mut self, window: &Window, event: &WindowEvent)
  {
    // The HUD is display-only; keys always reach the globe too.
    let _ = self.state.on_window_event(window, event);
  }

  pub fn record_frame_time(&mut self, dt: f32)
  {
    if dt > 0.0
    {
      self.fps = self.fps * (1.0 - FPS_SMOOTHING) + (1.0 / dt) * FPS_SMOOTHING;
    }
  }

  pub fn render(
    &mut self,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    encoder: &mut wgpu::CommandEncoder,
    window: &Window,
    view: &wgpu::TextureView,
    snapshot: &HudSnapshot,
  )
  {
    let raw_input = self.state.take_egui_input(window);
    let fps = self.fps;
    let full_output = self.context.run(raw_input, |ctx| draw_panel(ctx, snapshot, fps));

    let egui::FullOutput { platform_output, textures_delta, shapes, pixels_per_point, .. } =
      full_output;
    self.state.handle_platform_output(window, platform_output);

    let size = window.inner_size();
    let screen_descriptor =
      ScreenDescriptor { size_in_pixels: [size.width, size.height], pixels_per_point };

    for (id, delta) in &textures_delta.set
    {
      self.renderer.update_texture(device, queue, *id, delta);
    }

    let tris = self.context.tessellate(shapes, pixels_per_point);
    self.renderer.update_buffers(device, queue, encoder, &tris, &screen_descriptor);

    {
      let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("HUD Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
          view,
          resolve_target: None,
          ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
          depth_slice: None,
        })],
        ..Default::default()
      });

      // egui-wgpu wants a 'static pass; it is dropped at the end of
      // this block, before the encoder is touched again.
      let mut pass = pass.forget_lifetime();

      self.renderer.render(&mut pass, &tris, &screen_descriptor);
    }

    for id in &textures_delta.free
    {
      self.renderer.free_texture(id);
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Panel layout
// ──────────────────────────────────────────────────────────────
//

fn draw_panel(ctx: &egui::Context, snapshot: &HudSnapshot, fps: f32)
{
  egui::Window::new("Globe").resizable(false).collapsible(true).show(ctx, |ui| {
    ui.label(format!("mode: {}", snapshot.mode));
    ui.label(format!("fps: {fps:.0}"));
    ui.separator();

    let radius_label = match snapshot.mode
    {
      ViewMode::Mercator => "radius",
      ViewMode::Orbit => "distance",
    };

    egui::Grid::new("camera_state").num_columns(2).show(ui, |ui| {
      ui.label(radius_label);
      ui.label(format!("{:.2}", snapshot.radius));
      ui.end_row();

      ui.label("orbit");
      ui.label(format!("{:.2} rad", snapshot.orbit_angle));
      ui.end_row();

      ui.label("pitch");
      ui.label(format!("{:.2} rad", snapshot.pitch));
      ui.end_row();

      ui.label("yaw");
      ui.label(format!("{:.2} rad", snapshot.yaw));
      ui.end_row();
    });

    ui.separator();
    let held = if snapshot.held.is_empty() { "-" } else { snapshot.held.as_str() };
    ui.label(format!("held: {held}"));

    ui.collapsing("keys", |ui| {
      for (keys, action) in KEY_HELP
      {
        ui.label(format!("{keys}: {action}"));
      }
    });
  });
}
