//! CPU-side triangle meshes and the procedural builtin catalogue.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Interleaved vertex layout shared by every mesh.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space unit normal.
    pub normal: [f32; 3],
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices, three per face.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Build a mesh from positions and triangles, deriving smooth vertex
    /// normals from area-weighted face normals.
    #[must_use]
    pub fn from_triangles(positions: &[Vec3], indices: Vec<u32>) -> Self {
        let mut normals = vec![Vec3::ZERO; positions.len()];
        for tri in indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
            let face = (positions[b] - positions[a])
                .cross(positions[c] - positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        let vertices = positions
            .iter()
            .zip(normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.normalize_or(Vec3::Y).to_array(),
            })
            .collect();
        Self { vertices, indices }
    }

    /// Unit UV sphere centred on the origin.
    #[must_use]
    pub fn uv_sphere(segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let mut vertices = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
        for ring in 0..=rings {
            let theta = ring as f32 / rings as f32 * PI;
            for seg in 0..=segments {
                let phi = seg as f32 / segments as f32 * TAU;
                let n = Vec3::new(
                    theta.sin() * phi.sin(),
                    theta.cos(),
                    theta.sin() * phi.cos(),
                );
                vertices.push(MeshVertex {
                    position: n.to_array(),
                    normal: n.to_array(),
                });
            }
        }

        let stride = segments + 1;
        let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
        for ring in 0..rings {
            for seg in 0..segments {
                let a = ring * stride + seg;
                let b = a + stride;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
        Self { vertices, indices }
    }

    /// Unit cube centred on the origin with flat faces.
    #[must_use]
    pub fn cube() -> Self {
        let faces = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for normal in faces {
            let u = normal.any_orthonormal_vector();
            let v = normal.cross(u);
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let p = (normal + u * su + v * sv) * 0.5;
                vertices.push(MeshVertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self { vertices, indices }
    }

    /// Paper-plane style dart with its nose on `+Z`, wings along `X` and the
    /// fin on `+Y`. Flat shaded so the heading reads clearly on screen.
    #[must_use]
    pub fn dart() -> Self {
        let nose = Vec3::new(0.0, 0.0, 1.0);
        let left = Vec3::new(-0.7, 0.0, -0.6);
        let right = Vec3::new(0.7, 0.0, -0.6);
        let tail = Vec3::new(0.0, 0.0, -0.4);
        let fin = Vec3::new(0.0, 0.35, -0.6);
        let keel = Vec3::new(0.0, -0.1, -0.4);

        let tris = [
            [nose, right, tail],
            [nose, tail, left],
            [nose, keel, right],
            [nose, left, keel],
            [nose, tail, fin],
            [nose, fin, tail],
        ];
        let mut vertices = Vec::with_capacity(tris.len() * 3);
        for [a, b, c] in tris {
            let normal = (b - a).cross(c - a).normalize_or(Vec3::Y);
            for p in [a, b, c] {
                vertices.push(MeshVertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                });
            }
        }
        let indices = (0..vertices.len() as u32).collect();
        Self { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices_in_range(mesh: &Mesh) -> bool {
        mesh.indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertices.len())
    }

    #[test]
    fn sphere_vertices_lie_on_unit_sphere() {
        let mesh = Mesh::uv_sphere(16, 8);
        assert_eq!(mesh.triangle_count(), 16 * 8 * 2);
        assert!(indices_in_range(&mesh));
        for v in &mesh.vertices {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn cube_has_six_quads() {
        let mesh = Mesh::cube();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert!(indices_in_range(&mesh));
    }

    #[test]
    fn dart_points_along_positive_z() {
        let mesh = Mesh::dart();
        assert!(indices_in_range(&mesh));
        let max_z = mesh
            .vertices
            .iter()
            .map(|v| v.position[2])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_z, 1.0);
    }

    #[test]
    fn derived_normals_face_outward() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y];
        let mesh = Mesh::from_triangles(&positions, vec![0, 1, 2]);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
        }
    }
}
