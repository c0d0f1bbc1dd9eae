use crate::primitive::PrimitiveKind;

/// CPU-side mesh: positions, normals, and triangle indices.
///
/// Generated once per primitive kind; backends upload these to vertex
/// buffers and never regenerate them.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Build the mesh for a primitive kind.
    ///
    /// Tessellation matches the decorative look: smooth 32x32 sphere, unit
    /// cube, 16x100 torus (ring 1.0, tube 0.3), and an 8x8 sphere for
    /// particles.
    pub fn for_primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Sphere => uv_sphere(1.0, 32, 32),
            PrimitiveKind::Box => unit_cube(),
            PrimitiveKind::Torus => torus(1.0, 0.3, 16, 100),
            PrimitiveKind::ParticleSphere => uv_sphere(1.0, 8, 8),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max).
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for p in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        (min, max)
    }
}

/// Latitude/longitude sphere centered at the origin.
fn uv_sphere(radius: f32, segments: u32, rings: u32) -> MeshData {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        for seg in 0..=segments {
            let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
            let n = [
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            ];
            normals.push(n);
            positions.push([n[0] * radius, n[1] * radius, n[2] * radius]);
        }
    }

    let stride = segments + 1;
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1]);
            indices.extend_from_slice(&[b, b + 1, a + 1]);
        }
    }

    MeshData {
        positions,
        normals,
        indices,
    }
}

/// Axis-aligned unit cube centered at the origin, four vertices per face
/// so normals stay flat.
fn unit_cube() -> MeshData {
    // (normal, u axis, v axis) per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, (n, u, v)) in FACES.iter().enumerate() {
        let base = (face * 4) as u32;
        for (su, sv) in [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)] {
            positions.push([
                n[0] * 0.5 + u[0] * su + v[0] * sv,
                n[1] * 0.5 + u[1] * su + v[1] * sv,
                n[2] * 0.5 + u[2] * su + v[2] * sv,
            ]);
            normals.push(*n);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    MeshData {
        positions,
        normals,
        indices,
    }
}

/// Torus in the XY plane: `ring` is the distance from the origin to the
/// tube center, `tube` the tube radius.
fn torus(ring: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for j in 0..=radial_segments {
        let v = std::f32::consts::TAU * j as f32 / radial_segments as f32;
        for i in 0..=tubular_segments {
            let u = std::f32::consts::TAU * i as f32 / tubular_segments as f32;
            let cx = ring * u.cos();
            let cy = ring * u.sin();
            let x = (ring + tube * v.cos()) * u.cos();
            let y = (ring + tube * v.cos()) * u.sin();
            let z = tube * v.sin();
            positions.push([x, y, z]);
            let len = ((x - cx).powi(2) + (y - cy).powi(2) + z.powi(2)).sqrt();
            normals.push([(x - cx) / len, (y - cy) / len, z / len]);
        }
    }

    let stride = tubular_segments + 1;
    for j in 0..radial_segments {
        for i in 0..tubular_segments {
            let a = j * stride + i;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1]);
            indices.extend_from_slice(&[b, b + 1, a + 1]);
        }
    }

    MeshData {
        positions,
        normals,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(mesh: &MeshData) {
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.indices.len() % 3, 0);
        let max = mesh.positions.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
        for n in &mesh.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "normal not unit: {len}");
        }
    }

    #[test]
    fn sphere_vertices_on_unit_radius() {
        let mesh = MeshData::for_primitive(PrimitiveKind::Sphere);
        assert_well_formed(&mesh);
        for p in &mesh.positions {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn box_is_unit_cube() {
        let mesh = MeshData::for_primitive(PrimitiveKind::Box);
        assert_well_formed(&mesh);
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let (min, max) = mesh.bounds();
        for axis in 0..3 {
            assert!((min[axis] + 0.5).abs() < 1e-6);
            assert!((max[axis] - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn torus_vertices_on_tube() {
        let mesh = MeshData::for_primitive(PrimitiveKind::Torus);
        assert_well_formed(&mesh);
        // Every vertex sits `tube` away from the ring circle in the XY plane.
        for p in &mesh.positions {
            let planar = (p[0] * p[0] + p[1] * p[1]).sqrt();
            let d = ((planar - 1.0).powi(2) + p[2] * p[2]).sqrt();
            assert!((d - 0.3).abs() < 1e-4);
        }
    }

    #[test]
    fn particle_sphere_is_low_poly() {
        let full = MeshData::for_primitive(PrimitiveKind::Sphere);
        let low = MeshData::for_primitive(PrimitiveKind::ParticleSphere);
        assert_well_formed(&low);
        assert!(low.positions.len() < full.positions.len() / 4);
    }
}
