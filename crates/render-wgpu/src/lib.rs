//! wgpu backend for the vitrine scene description.
//!
//! Walks the scene once per frame: gathers the light rig into a uniform,
//! groups mesh nodes by primitive into instance buffers, optionally
//! renders a directional shadow map, then draws contact shadows, opaque
//! meshes, and translucent particles into an MSAA target.
//!
//! # Invariants
//! - Mesh geometry is uploaded once at creation and never regenerated.
//! - The renderer never mutates the scene.
//! - Adapter/device acquisition failures surface as `RenderError` so the
//!   surface controller can trip its boundary.

mod camera;
mod gpu;
mod shaders;

pub use camera::OrbitCamera;
pub use gpu::{request_gpu, GpuHandles, RendererOptions, ShadowRefresh, WgpuSceneRenderer};

pub fn crate_info() -> &'static str {
    "vitrine-render-wgpu v0.1.0"
}
