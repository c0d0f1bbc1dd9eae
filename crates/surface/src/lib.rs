//! Render surface controller.
//!
//! A `Surface` owns one viewport's entire lifecycle: it builds the scene
//! (fixed lighting rig plus caller-supplied decorative content), runs the
//! fallible renderer factory, drives the per-frame motion pass, and
//! supervises failures. Initialization and per-frame errors trip the
//! `FailureBoundary` exactly once; recovery is always an explicit retry
//! that reconstructs the scene from scratch.
//!
//! # Invariants
//! - A failure inside the surface never propagates to the host; the host
//!   only ever observes a `SurfaceView`.
//! - After `teardown`, ticking is inert: no transform is mutated and no
//!   renderer is invoked.
//! - Each surface owns an independent scene, motion table, and clock.

mod boundary;
mod clock;
mod config;
mod indicator;
mod rig;
mod surface;

pub use boundary::{FailureBoundary, FALLBACK_NOTICE};
pub use clock::{FrameClock, Subscription};
pub use config::SurfaceConfig;
pub use indicator::{DotPulse, LoadingIndicator, DOT_COUNT};
pub use rig::install_lighting_rig;
pub use surface::{Surface, SurfaceView};

pub fn crate_info() -> &'static str {
    "vitrine-surface v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("surface"));
    }
}
