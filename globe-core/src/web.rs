use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, KeyboardEvent, Response, Window};

use crate::camera::ViewMode;
use crate::frame::{FrameDriver, Viewport};
use crate::input::{KeyEvent, KeySender};
use crate::renderer::Renderer;
use crate::texture::EarthImage;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Browser entry point: size `canvas_id` to the window, load the
/// map from `image_url` and start the `requestAnimationFrame` loop.
#[wasm_bindgen]
pub async fn start(canvas_id: String, mode: String, image_url: String) -> Result<(), JsValue>
{
  console_error_panic_hook::set_once();
  // A second start() on the same page already has a logger.
  let _ = console_log::init_with_level(log::Level::Info);

  let mode: ViewMode = mode.parse().map_err(to_js)?;

  let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
  let canvas = find_canvas(&window, &canvas_id)?;
  let size = size_canvas(&window, &canvas)?;

  let bytes = fetch_bytes(&window, &image_url).await?;
  let image = EarthImage::decode(&bytes).map_err(to_js)?;

  let renderer =
    Renderer::new(wgpu::SurfaceTarget::Canvas(canvas), size, mode, &image).await.map_err(to_js)?;

  let (mut driver, keys) = FrameDriver::new(mode);
  driver.mark_ready();

  install_key_listeners(&window, &keys)?;
  run_animation_loop(window, driver, renderer)?;

  log::info!("globe running in {mode} mode");
  Ok(())
}

//
// ──────────────────────────────────────────────────────────────
//   DOM helpers
// ──────────────────────────────────────────────────────────────
//

fn find_canvas(window: &Window, canvas_id: &str) -> Result<HtmlCanvasElement, JsValue>
{
  window
    .document()
    .ok_or_else(|| JsValue::from_str("no document"))?
    .get_element_by_id(canvas_id)
    .ok_or_else(|| JsValue::from_str(&format!("no canvas with id {canvas_id}")))?
    .dyn_into::<HtmlCanvasElement>()
    .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))
}

/// Backing store in device pixels, same as the window's CSS size
/// times devicePixelRatio.
fn size_canvas(window: &Window, canvas: &HtmlCanvasElement) -> Result<Viewport, JsValue>
{
  let dpr = window.device_pixel_ratio();
  let css_width = window.inner_width()?.as_f64().unwrap_or(0.0);
  let css_height = window.inner_height()?.as_f64().unwrap_or(0.0);

  let size = Viewport::new((css_width * dpr) as u32, (css_height * dpr) as u32);
  canvas.set_width(size.width);
  canvas.set_height(size.height);

  Ok(size)
}

async fn fetch_bytes(window: &Window, url: &str) -> Result<Vec<u8>, JsValue>
{
  let response: Response = JsFuture::from(window.fetch_with_str(url)).await?.dyn_into()?;
  if !response.ok()
  {
    return Err(JsValue::from_str(&format!("fetching {url} failed: HTTP {}", response.status())));
  }

  let buffer = JsFuture::from(response.array_buffer()?).await?;
  Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

fn install_key_listeners(window: &Window, keys: &KeySender) -> Result<(), JsValue>
{
  for (event_name, pressed) in [("keydown", true), ("keyup", false)]
  {
    let keys = keys.clone();
    let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
      keys.send(KeyEvent::new(event.key(), pressed));
    });

    window.add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())?;

    // Listeners live as long as the page.
    handler.forget();
  }

  Ok(())
}

//
// ──────────────────────────────────────────────────────────────
//   Frame loop
//
//   The callback re-registers itself each frame, so it has to hold
//   a handle to its own closure.
// ──────────────────────────────────────────────────────────────
//

fn run_animation_loop(window: Window, mut driver: FrameDriver, mut renderer: Renderer) -> Result<(), JsValue>
{
  let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
  let next = callback.clone();
  let loop_window = window.clone();

  *callback.borrow_mut() = Some(Closure::new(move |timestamp_ms: f64| {
    if let Some(frame) = driver.tick(timestamp_ms / 1000.0, renderer.viewport())
    {
      if let Err(err) = renderer.render(&frame.payload)
      {
        log::error!("frame dropped: {err}");
      }
    }

    if let Some(cb) = next.borrow().as_ref()
    {
      if let Err(err) = loop_window.request_animation_frame(cb.as_ref().unchecked_ref())
      {
        log::error!("could not schedule next frame: {err:?}");
      }
    }
  }));

  if let Some(cb) = callback.borrow().as_ref()
  {
    window.request_animation_frame(cb.as_ref().unchecked_ref())?;
  }

  Ok(())
}

fn to_js(err: impl std::fmt::Display) -> JsValue
{
  JsValue::from_str(&err.to_string())
}
