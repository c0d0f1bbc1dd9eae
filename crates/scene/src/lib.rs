//! Explicit scene description and the per-frame motion pass.
//!
//! The scene is plain data: a flat table of typed nodes (lights, meshes,
//! groups) keyed by stable id, with parent links forming a tree. Renderers
//! walk the table once per frame; they never mutate it. All animation goes
//! through `MotionSet::advance`, a single update pass that writes each
//! animated node's transform as a pure function of elapsed time.
//!
//! # Invariants
//! - Node iteration order is deterministic (BTreeMap).
//! - A motion mutates only its own node's transform, as an absolute
//!   function of elapsed time — never of the previous frame's state.
//! - Particle positions are sampled once at creation and never change;
//!   only the owning group's orientation varies.

mod geometry;
mod material;
mod motion;
mod node;
mod objects;
mod particles;
mod primitive;

pub use geometry::MeshData;
pub use material::Material;
pub use motion::{Motion, MotionSet, BOB_AMPLITUDE, SPIN_RATE};
pub use node::{Node, NodeKind, Scene, ShadowSettings};
pub use objects::FloatingObject;
pub use particles::{ParticleField, FIELD_SIDE, PARTICLE_COUNT, PARTICLE_RADIUS};
pub use primitive::PrimitiveKind;

pub fn crate_info() -> &'static str {
    "vitrine-scene v0.1.0"
}
