use globe_core::KeySender;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::Key;

//
// ──────────────────────────────────────────────────────────────
//   winit → key names
//
//   Key names follow the browser's `KeyboardEvent.key`, so the
//   core sees "w" and "ArrowUp" whichever host it runs in. Logical
//   keys are used so the layout decides what `w` is.
// ──────────────────────────────────────────────────────────────
//

pub fn key_name(key: &Key) -> Option<String>
{
  match key
  {
    Key::Character(text) => Some(text.to_string()),
    // NamedKey's Debug output is the DOM name: ArrowUp, Shift, Enter...
    Key::Named(named) => Some(format!("{named:?}")),
    Key::Unidentified(_) | Key::Dead(_) => None,
  }
}

/// Push keyboard events onto the frame driver's queue. Returns true
/// if the event was a key event.
pub fn forward_key_event(event: &WindowEvent, keys: &KeySender) -> bool
{
  let WindowEvent::KeyboardInput { event, .. } = event
  else
  {
    return false;
  };

  let Some(name) = key_name(&event.logical_key)
  else
  {
    return true;
  };

  match event.state
  {
    ElementState::Pressed => keys.key_down(name),
    ElementState::Released => keys.key_up(name),
  }

  true
}

#[cfg(test)]
mod tests
{
  use winit::keyboard::{NamedKey, NativeKey, SmolStr};

  use super::*;

  #[test]
  fn characters_keep_their_case()
  {
    assert_eq!(key_name(&Key::Character(SmolStr::new("w"))).as_deref(), Some("w"));
    assert_eq!(key_name(&Key::Character(SmolStr::new("W"))).as_deref(), Some("W"));
  }

  #[test]
  fn arrows_use_dom_names()
  {
    let cases = [
      (NamedKey::ArrowUp, "ArrowUp"),
      (NamedKey::ArrowDown, "ArrowDown"),
      (NamedKey::ArrowLeft, "ArrowLeft"),
      (NamedKey::ArrowRight, "ArrowRight"),
    ];

    for (named, expected) in cases
    {
      assert_eq!(key_name(&Key::Named(named)).as_deref(), Some(expected));
    }
  }

  #[test]
  fn matches_core_key_constants()
  {
    use globe_core::input::{KEY_PITCH_UP, KEY_YAW_RIGHT, KEY_ZOOM_IN};

    assert_eq!(key_name(&Key::Character(SmolStr::new("w"))).as_deref(), Some(KEY_ZOOM_IN));
    assert_eq!(key_name(&Key::Named(NamedKey::ArrowUp)).as_deref(), Some(KEY_PITCH_UP));
    assert_eq!(key_name(&Key::Named(NamedKey::ArrowRight)).as_deref(), Some(KEY_YAW_RIGHT));
  }

  #[test]
  fn unidentified_keys_are_ignored()
  {
    assert_eq!(key_name(&Key::Unidentified(NativeKey::Unidentified)), None);
    assert_eq!(key_name(&Key::Dead(None)), None);
  }
}
