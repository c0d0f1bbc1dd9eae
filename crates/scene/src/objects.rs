use glam::Vec3;
use serde::{Deserialize, Serialize};
use vitrine_common::{Color, ObjectId, Transform};

use crate::material::Material;
use crate::motion::{Motion, MotionSet};
use crate::node::{NodeKind, Scene};
use crate::primitive::PrimitiveKind;

/// Description of one decorative floating primitive.
///
/// Spawning inserts a mesh node and registers a `Drift` motion for it.
/// The horizontal and depth position components stay fixed at the spawn
/// value forever; only the vertical component is animated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatingObject {
    pub position: Vec3,
    pub kind: PrimitiveKind,
    pub color: Color,
    pub scale: f32,
    pub speed: f32,
}

impl Default for FloatingObject {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            kind: PrimitiveKind::Sphere,
            color: Color::default(),
            scale: 1.0,
            speed: 1.0,
        }
    }
}

impl FloatingObject {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: PrimitiveKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Insert this object into the scene and register its motion.
    pub fn spawn(self, scene: &mut Scene, motions: &mut MotionSet) -> ObjectId {
        let transform = Transform::from_position(self.position).with_uniform_scale(self.scale);
        let id = scene.insert(
            None,
            transform,
            NodeKind::Mesh {
                primitive: self.kind,
                material: Material::standard(self.color),
            },
        );
        motions.insert(
            id,
            Motion::Drift {
                base_height: self.position.y,
                speed: self.speed,
            },
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::BOB_AMPLITUDE;

    #[test]
    fn spawn_inserts_mesh_and_motion() {
        let mut scene = Scene::new();
        let mut motions = MotionSet::new();
        let id = FloatingObject::new(Vec3::new(-3.0, 2.0, -2.0))
            .kind(PrimitiveKind::Torus)
            .color(Color::CYAN)
            .scale(0.4)
            .speed(1.5)
            .spawn(&mut scene, &mut motions);

        let node = scene.get(id).unwrap();
        assert!(matches!(
            node.kind,
            NodeKind::Mesh {
                primitive: PrimitiveKind::Torus,
                ..
            }
        ));
        assert_eq!(node.transform.scale, Vec3::splat(0.4));
        assert_eq!(
            motions.get(id),
            Some(&Motion::Drift {
                base_height: 2.0,
                speed: 1.5
            })
        );
    }

    #[test]
    fn spawned_object_bobs_around_its_base_height() {
        let mut scene = Scene::new();
        let mut motions = MotionSet::new();
        let id = FloatingObject::new(Vec3::new(2.0, 3.0, 0.0)).spawn(&mut scene, &mut motions);

        for step in 0..500 {
            motions.advance(&mut scene, step as f32 * 0.05);
            let p = scene.get(id).unwrap().transform.position;
            assert_eq!(p.x, 2.0);
            assert_eq!(p.z, 0.0);
            assert!((p.y - 3.0).abs() <= BOB_AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn default_object_is_a_unit_sphere_at_origin() {
        let o = FloatingObject::default();
        assert_eq!(o.kind, PrimitiveKind::Sphere);
        assert_eq!(o.position, Vec3::ZERO);
        assert_eq!(o.scale, 1.0);
        assert_eq!(o.speed, 1.0);
    }
}
