//! Renderer-agnostic interface over the scene description.
//!
//! # Invariants
//! - Renderers walk the scene; they never mutate it.
//! - Every fallible step (context creation, per-frame draw) surfaces as a
//!   `RenderError` so the surface controller can trip its boundary;
//!   renderers do not recover on their own.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderError, RenderView, SceneRenderer};

pub fn crate_info() -> &'static str {
    "vitrine-render v0.1.0"
}
