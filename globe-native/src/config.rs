use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globe_core::ViewMode;
use serde::Deserialize;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

pub const CONFIG_ENV: &str = "GLOBE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "globe.json";
const DEFAULT_IMAGE: &str = "assets/blue-marble.jpg";

//
// ──────────────────────────────────────────────────────────────
//   ViewerConfig
//
//   Every field is optional in the JSON; missing ones fall back
//   to the defaults below.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig
{
  pub mode: ViewMode,
  pub image_path: PathBuf,
  pub window: WindowConfig,
  pub show_hud: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig
{
  pub title: String,
  pub width: u32,
  pub height: u32,
}

impl Default for ViewerConfig
{
  fn default() -> Self
  {
    Self {
      mode: ViewMode::default(),
      image_path: PathBuf::from(DEFAULT_IMAGE),
      window: WindowConfig::default(),
      show_hud: true,
    }
  }
}

impl Default for WindowConfig
{
  fn default() -> Self
  {
    Self { title: "Globe".to_owned(), width: 1280, height: 720 }
  }
}

impl ViewerConfig
{
  /// `$GLOBE_CONFIG` must exist if set; `globe.json` is optional.
  pub fn load() -> Result<Self>
  {
    if let Some(path) = std::env::var_os(CONFIG_ENV)
    {
      return Self::from_file(Path::new(&path));
    }

    let fallback = Path::new(DEFAULT_CONFIG_FILE);
    if fallback.exists()
    {
      return Self::from_file(fallback);
    }

    log::info!("no {DEFAULT_CONFIG_FILE}, using built-in defaults");
    Ok(Self::default())
  }

  pub fn from_file(path: &Path) -> Result<Self>
  {
    let text = std::fs::read_to_string(path)
      .with_context(|| format!("reading config {}", path.display()))?;
    let config =
      Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))?;

    log::info!("loaded config from {}", path.display());
    Ok(config)
  }

  pub fn from_json(text: &str) -> Result<Self>
  {
    Ok(serde_json::from_str(text)?)
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn empty_object_gives_defaults()
  {
    let config = ViewerConfig::from_json("{}").unwrap();
    assert_eq!(config, ViewerConfig::default());
    assert_eq!(config.mode, ViewMode::Mercator);
    assert!(config.show_hud);
  }

  #[test]
  fn partial_config_keeps_other_defaults()
  {
    let config = ViewerConfig::from_json(
      r#"{ "mode": "orbit", "window": { "width": 640 }, "show_hud": false }"#,
    )
    .unwrap();

    assert_eq!(config.mode, ViewMode::Orbit);
    assert_eq!(config.window.width, 640);
    assert_eq!(config.window.height, 720);
    assert_eq!(config.image_path, PathBuf::from(DEFAULT_IMAGE));
    assert!(!config.show_hud);
  }

  #[test]
  fn legacy_mode_name_is_accepted()
  {
    let config = ViewerConfig::from_json(r#"{ "mode": "newton-vg" }"#).unwrap();
    assert_eq!(config.mode, ViewMode::Orbit);
  }

  #[test]
  fn unknown_fields_and_modes_are_rejected()
  {
    assert!(ViewerConfig::from_json(r#"{ "mode": "globe" }"#).is_err());
    assert!(ViewerConfig::from_json(r#"{ "keybindings": {} }"#).is_err());
  }

  #[test]
  fn missing_explicit_file_is_an_error()
  {
    let err = ViewerConfig::from_file(Path::new("definitely/not/here.json")).unwrap_err();
    assert!(err.to_string().contains("definitely/not/here.json"));
  }
}
