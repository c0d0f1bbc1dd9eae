use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vitrine_common::{ObjectId, Transform};

use crate::node::Scene;

/// Base spin rate in radians per second for drifting objects.
/// Matches a per-frame increment of 0.01 rad at a 60 Hz refresh.
pub const SPIN_RATE: f32 = 0.6;

/// Amplitude of the vertical bob, in world units.
pub const BOB_AMPLITUDE: f32 = 0.2;

/// Amplitude of the secondary rotation wobble.
const WOBBLE_AMPLITUDE: f32 = 0.1;

/// Procedural motion for one node. Every variant is an absolute function
/// of elapsed time, so behavior is identical regardless of frame rate or
/// missed frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Floating-object motion: linear spin about the horizontal and
    /// vertical axes, a bounded vertical bob around `base_height`, and a
    /// rotation wobble at twice the configured speed. Horizontal and depth
    /// position are never touched.
    Drift { base_height: f32, speed: f32 },
    /// Rigid-body rotation of a particle field group at two fixed angular
    /// rates about two axes.
    FieldSpin { x_rate: f32, y_rate: f32 },
}

impl Motion {
    /// Field-spin rates used by particle fields.
    pub fn field_spin() -> Self {
        Self::FieldSpin {
            x_rate: 0.1,
            y_rate: 0.15,
        }
    }

    /// Write this motion's pose for elapsed time `t` into `transform`.
    pub fn apply(&self, transform: &mut Transform, t: f32) {
        match *self {
            Self::Drift { base_height, speed } => {
                let angle = SPIN_RATE * speed * t;
                transform.rotation.x = angle;
                transform.rotation.y = angle;
                // Secondary float layer: wobble only, so the vertical
                // bound of +/- BOB_AMPLITUDE holds exactly.
                transform.rotation.z = WOBBLE_AMPLITUDE * (2.0 * speed * t).sin();
                transform.position.y = base_height + BOB_AMPLITUDE * (speed * t).sin();
            }
            Self::FieldSpin { x_rate, y_rate } => {
                transform.rotation.x = x_rate * t;
                transform.rotation.y = y_rate * t;
            }
        }
    }
}

/// Motion components keyed by node id.
///
/// The table is the single owner of animation state; nodes themselves hold
/// no per-frame bookkeeping. One `advance` call per tick updates every
/// animated transform in deterministic id order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MotionSet {
    motions: BTreeMap<ObjectId, Motion>,
}

impl MotionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ObjectId, motion: Motion) {
        self.motions.insert(id, motion);
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<Motion> {
        self.motions.remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Motion> {
        self.motions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    /// The per-tick update pass: O(1) per entry, each motion mutating only
    /// its own node's transform. Ids whose node has been removed from the
    /// scene are skipped.
    pub fn advance(&self, scene: &mut Scene, elapsed: f32) {
        let _span = tracing::trace_span!("motion_advance", t = elapsed).entered();
        for (id, motion) in &self.motions {
            if let Some(transform) = scene.transform_mut(*id) {
                motion.apply(transform, elapsed);
            }
        }
    }
}
