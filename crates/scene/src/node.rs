use glam::Mat4;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vitrine_common::{Color, ObjectId, Transform};

use crate::material::Material;
use crate::primitive::PrimitiveKind;

/// Shadow parameters for a directional light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowSettings {
    /// Shadow map resolution per side. Clamped to `MAX_SHADOW_MAP_SIZE`.
    pub map_size: u32,
    /// Half-extent of the orthographic shadow frustum, bounded to the
    /// decorative scene's extent rather than the whole world.
    pub extent: f32,
}

/// Upper bound on shadow map resolution, independent of caller input.
pub const MAX_SHADOW_MAP_SIZE: u32 = 2048;

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            map_size: MAX_SHADOW_MAP_SIZE,
            extent: 15.0,
        }
    }
}

impl ShadowSettings {
    /// Map size with the resolution bound applied.
    pub fn bounded_map_size(&self) -> u32 {
        self.map_size.clamp(1, MAX_SHADOW_MAP_SIZE)
    }
}

/// Typed payload of a scene node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Uniform fill light. Position is irrelevant.
    AmbientLight { intensity: f32 },
    /// Key light. Shines from the node's position toward the origin.
    DirectionalLight {
        intensity: f32,
        shadow: Option<ShadowSettings>,
    },
    /// Local fill or accent light at the node's position.
    PointLight { intensity: f32, color: Color },
    /// Drawable primitive with its material.
    Mesh {
        primitive: PrimitiveKind,
        material: Material,
    },
    /// Pure transform parent.
    Group,
    /// Soft contact-shadow plane beneath the composed content.
    ShadowCatcher {
        opacity: f32,
        radius: f32,
        falloff: f32,
    },
}

/// One node in the scene table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub parent: Option<ObjectId>,
    pub transform: Transform,
    pub kind: NodeKind,
}

/// The scene description: a flat, id-keyed node table with parent links.
///
/// Uses BTreeMap so walking the scene visits nodes in a deterministic
/// order regardless of insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    nodes: BTreeMap<ObjectId, Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a node under `parent` (or at the root) and return its id.
    ///
    /// A dangling parent id is configuration misuse, not an error: the node
    /// is re-parented to the root and the incident is logged.
    pub fn insert(
        &mut self,
        parent: Option<ObjectId>,
        transform: Transform,
        kind: NodeKind,
    ) -> ObjectId {
        let parent = match parent {
            Some(p) if !self.nodes.contains_key(&p) => {
                tracing::debug!(?p, "parent not in scene, inserting at root");
                None
            }
            other => other,
        };
        let id = ObjectId::new();
        self.nodes.insert(
            id,
            Node {
                parent,
                transform,
                kind,
            },
        );
        id
    }

    /// Remove a node and its entire subtree. Returns the removed ids.
    pub fn remove(&mut self, id: ObjectId) -> Vec<ObjectId> {
        let mut removed = Vec::new();
        if self.nodes.remove(&id).is_none() {
            return removed;
        }
        removed.push(id);
        // Children may themselves have children; iterate until stable.
        loop {
            let orphans: Vec<ObjectId> = self
                .nodes
                .iter()
                .filter(|(_, n)| matches!(n.parent, Some(p) if removed.contains(&p)))
                .map(|(id, _)| *id)
                .collect();
            if orphans.is_empty() {
                break;
            }
            for o in orphans {
                self.nodes.remove(&o);
                removed.push(o);
            }
        }
        removed
    }

    pub fn get(&self, id: ObjectId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Mutable access to a node's transform, used by the motion pass.
    pub fn transform_mut(&mut self, id: ObjectId) -> Option<&mut Transform> {
        self.nodes.get_mut(&id).map(|n| &mut n.transform)
    }

    /// Deterministic iteration over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = (ObjectId, &Node)> {
        self.nodes.iter().map(|(id, n)| (*id, n))
    }

    /// Direct children of a node, in id order.
    pub fn children(&self, parent: ObjectId) -> Vec<ObjectId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(parent))
            .map(|(id, _)| *id)
            .collect()
    }

    /// World transform: the chain of parent matrices applied to the node's
    /// local transform. Parent links form a tree, so the walk terminates.
    pub fn world_transform(&self, id: ObjectId) -> Option<Mat4> {
        let node = self.nodes.get(&id)?;
        let mut matrix = node.transform.matrix();
        let mut parent = node.parent;
        while let Some(pid) = parent {
            let Some(p) = self.nodes.get(&pid) else { break };
            matrix = p.transform.matrix() * matrix;
            parent = p.parent;
        }
        Some(matrix)
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| matches!(n.kind, NodeKind::Mesh { .. }))
            .count()
    }

    pub fn light_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| {
                matches!(
                    n.kind,
                    NodeKind::AmbientLight { .. }
                        | NodeKind::DirectionalLight { .. }
                        | NodeKind::PointLight { .. }
                )
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn scene_starts_empty() {
        let s = Scene::new();
        assert!(s.is_empty());
        assert_eq!(s.mesh_count(), 0);
    }

    #[test]
    fn insert_and_remove() {
        let mut s = Scene::new();
        let id = s.insert(None, Transform::default(), NodeKind::Group);
        assert_eq!(s.len(), 1);
        assert!(s.get(id).is_some());

        let removed = s.remove(id);
        assert_eq!(removed, vec![id]);
        assert!(s.is_empty());
    }

    #[test]
    fn remove_takes_subtree() {
        let mut s = Scene::new();
        let root = s.insert(None, Transform::default(), NodeKind::Group);
        let child = s.insert(Some(root), Transform::default(), NodeKind::Group);
        let grandchild = s.insert(Some(child), Transform::default(), NodeKind::Group);
        let sibling = s.insert(None, Transform::default(), NodeKind::Group);

        let removed = s.remove(root);
        assert_eq!(removed.len(), 3);
        assert!(removed.contains(&grandchild));
        assert!(s.get(sibling).is_some());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn dangling_parent_reparents_to_root() {
        let mut s = Scene::new();
        let ghost = ObjectId::new();
        let id = s.insert(Some(ghost), Transform::default(), NodeKind::Group);
        assert_eq!(s.get(id).unwrap().parent, None);
    }

    #[test]
    fn world_transform_chains_parents() {
        let mut s = Scene::new();
        let group = s.insert(
            None,
            Transform::from_position(Vec3::new(1.0, 0.0, 0.0)),
            NodeKind::Group,
        );
        let child = s.insert(
            Some(group),
            Transform::from_position(Vec3::new(0.0, 2.0, 0.0)),
            NodeKind::Group,
        );
        let world = s.world_transform(child).unwrap();
        let p = world.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn shadow_map_size_is_bounded() {
        let settings = ShadowSettings {
            map_size: 16_384,
            extent: 15.0,
        };
        assert_eq!(settings.bounded_map_size(), MAX_SHADOW_MAP_SIZE);
        assert_eq!(ShadowSettings::default().bounded_map_size(), 2048);
    }

    #[test]
    fn children_in_id_order() {
        let mut s = Scene::new();
        let root = s.insert(None, Transform::default(), NodeKind::Group);
        for _ in 0..10 {
            s.insert(Some(root), Transform::default(), NodeKind::Group);
        }
        let kids = s.children(root);
        assert_eq!(kids.len(), 10);
        let mut sorted = kids.clone();
        sorted.sort();
        assert_eq!(kids, sorted);
    }
}
