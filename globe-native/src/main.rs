mod app;
mod config;
mod gui;
mod input;

use env_logger::{Builder, Env};

fn main() -> anyhow::Result<()>
{
  // RUST_LOG still wins; the default keeps wgpu_hal quiet and naga to warnings.
  Builder::from_env(Env::default().default_filter_or("info,wgpu_hal=off,naga=warn")).init();

  let config = config::ViewerConfig::load()?;
  log::info!("starting in {} mode", config.mode);

  app::run(config)
}
