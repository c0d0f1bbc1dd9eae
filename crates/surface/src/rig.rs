use glam::Vec3;
use vitrine_common::{Color, Transform};
use vitrine_scene::{NodeKind, Scene, ShadowSettings};

/// Install the fixed lighting rig into a fresh scene.
///
/// The rig is deliberately not configurable per call site: every surface
/// gets the same low ambient fill, one shadow-casting key light above and
/// in front, a neutral fill point light, and a tinted accent point light.
/// When `shadows` is on, a soft contact-shadow plane sits beneath the
/// composed content.
pub fn install_lighting_rig(scene: &mut Scene, shadows: bool) {
    scene.insert(
        None,
        Transform::default(),
        NodeKind::AmbientLight { intensity: 0.6 },
    );
    scene.insert(
        None,
        Transform::from_position(Vec3::new(10.0, 10.0, 5.0)),
        NodeKind::DirectionalLight {
            intensity: 1.5,
            shadow: shadows.then(ShadowSettings::default),
        },
    );
    scene.insert(
        None,
        Transform::from_position(Vec3::new(-10.0, -10.0, -10.0)),
        NodeKind::PointLight {
            intensity: 0.5,
            color: Color::WHITE,
        },
    );
    scene.insert(
        None,
        Transform::from_position(Vec3::new(10.0, -10.0, 10.0)),
        NodeKind::PointLight {
            intensity: 0.3,
            color: Color::BLUE,
        },
    );
    if shadows {
        scene.insert(
            None,
            Transform::from_position(Vec3::new(0.0, -2.0, 0.0)),
            NodeKind::ShadowCatcher {
                opacity: 0.4,
                radius: 10.0,
                falloff: 2.0,
            },
        );
    }
}
