use serde::{Deserialize, Serialize};

/// Decorative primitive shapes.
///
/// `ParticleSphere` is a low-tessellation sphere reserved for particle
/// fields; it is not part of the parse surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Sphere,
    Box,
    Torus,
    ParticleSphere,
}

impl PrimitiveKind {
    /// Parse a kind name. Unknown names fall back to `Sphere` — a
    /// malformed kind is configuration misuse and never raises.
    pub fn parse(s: &str) -> Self {
        match s {
            "sphere" => Self::Sphere,
            "box" => Self::Box,
            "torus" => Self::Torus,
            other => {
                tracing::debug!(kind = other, "unknown primitive kind, using sphere");
                Self::Sphere
            }
        }
    }
}

impl Default for PrimitiveKind {
    fn default() -> Self {
        Self::Sphere
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!(PrimitiveKind::parse("sphere"), PrimitiveKind::Sphere);
        assert_eq!(PrimitiveKind::parse("box"), PrimitiveKind::Box);
        assert_eq!(PrimitiveKind::parse("torus"), PrimitiveKind::Torus);
    }

    #[test]
    fn unknown_kind_falls_back_to_sphere() {
        assert_eq!(PrimitiveKind::parse("dodecahedron"), PrimitiveKind::Sphere);
        assert_eq!(PrimitiveKind::parse(""), PrimitiveKind::Sphere);
        assert_eq!(PrimitiveKind::parse("Sphere"), PrimitiveKind::Sphere);
    }
}
