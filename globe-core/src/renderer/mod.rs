mod core;
mod quad;
mod resources;
mod targets;

pub use self::core::Renderer;
pub use quad::{QuadMesh, QUAD_INDICES, QUAD_VERTICES};
pub use resources::GpuResourceSet;
pub use targets::{RenderTargets, DEPTH_FORMAT};
