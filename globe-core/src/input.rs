use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

//
// ──────────────────────────────────────────────────────────────
//   Recognised keys (DOM `KeyboardEvent.key` names)
// ──────────────────────────────────────────────────────────────
//

pub const KEY_ZOOM_IN: &str = "w";
pub const KEY_ZOOM_OUT: &str = "s";
pub const KEY_PITCH_UP: &str = "ArrowUp";
pub const KEY_PITCH_DOWN: &str = "ArrowDown";
pub const KEY_YAW_LEFT: &str = "ArrowLeft";
pub const KEY_YAW_RIGHT: &str = "ArrowRight";

//
// ──────────────────────────────────────────────────────────────
//   InputState
//
//   Level-triggered: every key is either held or not. A key that
//   was never pressed and one that was released both read false.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Clone)]
pub struct InputState
{
  held: HashMap<String, bool>,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self::default()
  }

  /// Last write wins; repeated key-down events are harmless.
  pub fn on_key_change(&mut self, key: &str, is_down: bool)
  {
    match self.held.get_mut(key)
    {
      Some(state) => *state = is_down,
      None =>
      {
        self.held.insert(key.to_owned(), is_down);
      }
    }
  }

  pub fn is_held(&self, key: &str) -> bool
  {
    self.held.get(key).copied().unwrap_or(false)
  }

  /// True if any key at all is down, recognised or not.
  pub fn any_held(&self) -> bool
  {
    self.held.values().any(|&down| down)
  }

  /// Names of the keys currently down, sorted for stable display.
  pub fn held_keys(&self) -> Vec<&str>
  {
    let mut keys: Vec<&str> =
      self.held.iter().filter(|(_, down)| **down).map(|(key, _)| key.as_str()).collect();
    keys.sort_unstable();
    keys
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Key event queue
//
//   Event sources only ever hold a KeySender. The frame driver
//   owns the InputState and drains the queue once per tick, so
//   the map is never read and written at the same time.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent
{
  pub key: String,
  pub pressed: bool,
}

impl KeyEvent
{
  pub fn new(key: impl Into<String>, pressed: bool) -> Self
  {
    Self { key: key.into(), pressed }
  }
}

#[derive(Debug, Clone)]
pub struct KeySender
{
  tx: Sender<KeyEvent>,
}

impl KeySender
{
  pub fn send(&self, event: KeyEvent)
  {
    if self.tx.send(event).is_err()
    {
      log::debug!("key event dropped: frame driver is gone");
    }
  }

  pub fn key_down(&self, key: impl Into<String>)
  {
    self.send(KeyEvent::new(key, true));
  }

  pub fn key_up(&self, key: impl Into<String>)
  {
    self.send(KeyEvent::new(key, false));
  }
}

#[derive(Debug)]
pub struct KeyQueue
{
  rx: Receiver<KeyEvent>,
}

impl KeyQueue
{
  /// Apply every pending event in arrival order. Returns how many were applied.
  pub fn drain_into(&self, input: &mut InputState) -> usize
  {
    let mut applied = 0;

    loop
    {
      match self.rx.try_recv()
      {
        Ok(event) =>
        {
          input.on_key_change(&event.key, event.pressed);
          applied += 1;
        }
        Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
      }
    }

    applied
  }
}

pub fn key_channel() -> (KeySender, KeyQueue)
{
  let (tx, rx) = mpsc::channel();
  (KeySender { tx }, KeyQueue { rx })
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn unseen_keys_read_released()
  {
    let input = InputState::new();
    assert!(!input.is_held(KEY_ZOOM_IN));
    assert!(!input.any_held());
  }

  #[test]
  fn released_keys_stay_tracked_as_false()
  {
    let mut input = InputState::new();
    input.on_key_change(KEY_PITCH_UP, true);
    assert!(input.is_held(KEY_PITCH_UP));

    input.on_key_change(KEY_PITCH_UP, false);
    assert!(!input.is_held(KEY_PITCH_UP));
    assert!(!input.any_held());
  }

  #[test]
  fn key_names_are_case_sensitive()
  {
    let mut input = InputState::new();
    input.on_key_change("W", true);
    assert!(!input.is_held(KEY_ZOOM_IN));
    assert!(input.any_held());
  }

  #[test]
  fn repeated_key_down_is_idempotent()
  {
    let mut input = InputState::new();
    input.on_key_change(KEY_ZOOM_OUT, true);
    input.on_key_change(KEY_ZOOM_OUT, true);
    assert_eq!(input.held_keys(), vec![KEY_ZOOM_OUT]);
  }

  #[test]
  fn queue_applies_events_in_order()
  {
    let (keys, queue) = key_channel();
    let mut input = InputState::new();

    keys.key_down(KEY_YAW_LEFT);
    keys.key_down(KEY_ZOOM_IN);
    keys.key_up(KEY_YAW_LEFT);

    assert_eq!(queue.drain_into(&mut input), 3);
    assert!(!input.is_held(KEY_YAW_LEFT));
    assert!(input.is_held(KEY_ZOOM_IN));

    // Nothing pending on the second drain.
    assert_eq!(queue.drain_into(&mut input), 0);
    assert!(input.is_held(KEY_ZOOM_IN));
  }

  #[test]
  fn senders_can_cross_threads()
  {
    let (keys, queue) = key_channel();
    let remote = keys.clone();

    std::thread::spawn(move || remote.key_down(KEY_PITCH_DOWN)).join().unwrap();

    let mut input = InputState::new();
    queue.drain_into(&mut input);
    assert!(input.is_held(KEY_PITCH_DOWN));
  }

  #[test]
  fn sending_after_queue_dropped_does_not_panic()
  {
    let (keys, queue) = key_channel();
    drop(queue);
    keys.key_down(KEY_ZOOM_IN);
  }
}
