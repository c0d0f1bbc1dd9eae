use glam::Vec3;
use serde::{Deserialize, Serialize};
use vitrine_common::{ObjectId, Transform};

use crate::material::Material;
use crate::motion::{Motion, MotionSet};
use crate::node::{NodeKind, Scene};
use crate::primitive::PrimitiveKind;

/// Number of particles in a field.
pub const PARTICLE_COUNT: usize = 100;

/// Side length of the cubic volume particles are sampled from.
pub const FIELD_SIDE: f32 = 20.0;

/// Particle sphere radius, applied as a uniform scale.
pub const PARTICLE_RADIUS: f32 = 0.02;

/// A bounded cloud of small translucent spheres that rotates as a rigid
/// body.
///
/// Positions are sampled once at spawn, uniformly within a cube of side
/// `FIELD_SIDE` centered at the origin, from a seeded deterministic
/// generator. The field animates by rotating the owning group; individual
/// particles never move relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleField {
    pub seed: u64,
}

impl ParticleField {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Insert the field into the scene and register its spin motion.
    /// Returns the group node id.
    pub fn spawn(self, scene: &mut Scene, motions: &mut MotionSet) -> ObjectId {
        let group = scene.insert(None, Transform::default(), NodeKind::Group);
        let mut state = self.seed;
        for _ in 0..PARTICLE_COUNT {
            let position = Vec3::new(
                (next_unit(&mut state) - 0.5) * FIELD_SIDE,
                (next_unit(&mut state) - 0.5) * FIELD_SIDE,
                (next_unit(&mut state) - 0.5) * FIELD_SIDE,
            );
            scene.insert(
                Some(group),
                Transform::from_position(position).with_uniform_scale(PARTICLE_RADIUS),
                NodeKind::Mesh {
                    primitive: PrimitiveKind::ParticleSphere,
                    material: Material::particle(),
                },
            );
        }
        motions.insert(group, Motion::field_spin());
        tracing::debug!(seed = self.seed, count = PARTICLE_COUNT, "particle field spawned");
        group
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Advance the splitmix64 state and return a uniform value in [0, 1).
fn next_unit(state: &mut u64) -> f32 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 40) as f32 / (1u64 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_positions(scene: &Scene, group: ObjectId) -> Vec<Vec3> {
        scene
            .children(group)
            .into_iter()
            .map(|id| scene.get(id).unwrap().transform.position)
            .collect()
    }

    /// Child ids are random uuids, so `children` yields positions in an
    /// arbitrary order. Sort before comparing across scenes.
    fn sorted_positions(scene: &Scene, group: ObjectId) -> Vec<Vec3> {
        let mut positions = particle_positions(scene, group);
        positions.sort_by(|a, b| {
            a.x.total_cmp(&b.x)
                .then(a.y.total_cmp(&b.y))
                .then(a.z.total_cmp(&b.z))
        });
        positions
    }

    #[test]
    fn field_has_exactly_one_hundred_particles() {
        let mut scene = Scene::new();
        let mut motions = MotionSet::new();
        let group = ParticleField::new(7).spawn(&mut scene, &mut motions);
        assert_eq!(scene.children(group).len(), PARTICLE_COUNT);
        assert_eq!(scene.mesh_count(), PARTICLE_COUNT);
    }

    #[test]
    fn particles_sampled_within_cube() {
        let mut scene = Scene::new();
        let mut motions = MotionSet::new();
        let group = ParticleField::new(42).spawn(&mut scene, &mut motions);
        for p in particle_positions(&scene, group) {
            assert!(p.x.abs() <= FIELD_SIDE / 2.0);
            assert!(p.y.abs() <= FIELD_SIDE / 2.0);
            assert!(p.z.abs() <= FIELD_SIDE / 2.0);
        }
    }

    #[test]
    fn same_seed_same_positions() {
        let mut scene_a = Scene::new();
        let mut scene_b = Scene::new();
        let mut motions = MotionSet::new();
        let a = ParticleField::new(11).spawn(&mut scene_a, &mut motions);
        let b = ParticleField::new(11).spawn(&mut scene_b, &mut motions);
        assert_eq!(sorted_positions(&scene_a, a), sorted_positions(&scene_b, b));
    }

    #[test]
    fn different_seeds_sample_different_positions() {
        let mut scene_a = Scene::new();
        let mut scene_b = Scene::new();
        let mut motions = MotionSet::new();
        let a = ParticleField::new(11).spawn(&mut scene_a, &mut motions);
        let b = ParticleField::new(12).spawn(&mut scene_b, &mut motions);
        assert_ne!(sorted_positions(&scene_a, a), sorted_positions(&scene_b, b));
    }

    #[test]
    fn positions_fixed_while_group_rotates() {
        let mut scene = Scene::new();
        let mut motions = MotionSet::new();
        let group = ParticleField::new(3).spawn(&mut scene, &mut motions);

        motions.advance(&mut scene, 1.0);
        let early = particle_positions(&scene, group);
        let early_rot = scene.get(group).unwrap().transform.rotation;

        motions.advance(&mut scene, 9.0);
        let late = particle_positions(&scene, group);
        let late_rot = scene.get(group).unwrap().transform.rotation;

        assert_eq!(early, late);
        assert_ne!(early_rot, late_rot);
    }

    #[test]
    fn particles_share_the_translucent_material() {
        let mut scene = Scene::new();
        let mut motions = MotionSet::new();
        let group = ParticleField::default().spawn(&mut scene, &mut motions);
        for id in scene.children(group) {
            match &scene.get(id).unwrap().kind {
                NodeKind::Mesh {
                    primitive,
                    material,
                } => {
                    assert_eq!(*primitive, PrimitiveKind::ParticleSphere);
                    assert_eq!(*material, Material::particle());
                }
                other => panic!("unexpected node kind {other:?}"),
            }
        }
    }
}
