use serde::{Deserialize, Serialize};
use vitrine_common::Color;

/// Surface appearance of a mesh node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub opacity: f32,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Material {
    /// The decorative-object look: metallic, glossy, faintly
    /// self-illuminated in its own color.
    pub fn standard(color: Color) -> Self {
        Self {
            color,
            metalness: 0.8,
            roughness: 0.2,
            emissive: color,
            emissive_intensity: 0.1,
            opacity: 1.0,
            cast_shadow: true,
            receive_shadow: true,
        }
    }

    /// Shared translucent white material for particle fields.
    pub fn particle() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            emissive: Color::WHITE,
            emissive_intensity: 0.0,
            opacity: 0.6,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn is_translucent(&self) -> bool {
        self.opacity < 1.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(Color::default())
    }
}
