//! Mesh asset loading.
//!
//! Paths with the `builtin:` scheme resolve to procedural meshes; `.gltf`
//! and `.glb` files are read relative to the loader root through the `gltf`
//! crate. Every triangle primitive reachable from the default scene is
//! merged into one mesh with its node transforms baked in. Materials,
//! textures and animations are ignored.

use std::path::{Path, PathBuf};

use glam::{Mat3, Mat4, Vec3};

use super::mesh::{Mesh, MeshVertex};
use crate::error::OrbiterError;

/// Prefix for procedural meshes.
pub const BUILTIN_SCHEME: &str = "builtin:";

/// Resolves mesh paths to loaded [`Mesh`]es.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    /// Loader resolving relative file paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory relative paths are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load a mesh. Resolves once the geometry is ready.
    ///
    /// # Errors
    ///
    /// Returns [`OrbiterError::MeshLoad`] for unknown builtins, unsupported
    /// extensions, unreadable files and glTF documents without triangles.
    pub async fn load_mesh(&self, path: &str) -> Result<Mesh, OrbiterError> {
        if let Some(name) = path.strip_prefix(BUILTIN_SCHEME) {
            return builtin_mesh(name);
        }

        let full = self.root.join(path);
        let is_gltf = full.extension().is_some_and(|ext| {
            ext.eq_ignore_ascii_case("gltf") || ext.eq_ignore_ascii_case("glb")
        });
        if !is_gltf {
            return Err(OrbiterError::MeshLoad(format!(
                "{}: unsupported mesh format",
                full.display()
            )));
        }

        let mesh = load_gltf(&full).map_err(|e| {
            OrbiterError::MeshLoad(format!("{}: {e}", full.display()))
        })?;
        log::info!(
            "loaded {} ({} vertices, {} triangles)",
            full.display(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

fn builtin_mesh(name: &str) -> Result<Mesh, OrbiterError> {
    match name {
        "sphere" => Ok(Mesh::uv_sphere(48, 24)),
        "cube" => Ok(Mesh::cube()),
        "dart" => Ok(Mesh::dart()),
        other => Err(OrbiterError::MeshLoad(format!(
            "unknown builtin mesh `{other}`"
        ))),
    }
}

/// Geometry gathered from every primitive, in world space.
#[derive(Default)]
struct Gathered {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    /// Cleared as soon as one primitive lacks normals.
    has_normals: bool,
}

fn load_gltf(path: &Path) -> Result<Mesh, String> {
    let gltf = gltf::Gltf::open(path).map_err(|e| e.to_string())?;
    let buffers = gltf::import_buffers(&gltf.document, path.parent(), gltf.blob)
        .map_err(|e| e.to_string())?;

    let mut out = Gathered {
        has_normals: true,
        ..Gathered::default()
    };
    match gltf.document.default_scene().or_else(|| gltf.document.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                gather_node(&node, Mat4::IDENTITY, &buffers, &mut out)?;
            }
        }
        None => {
            for mesh in gltf.document.meshes() {
                for primitive in mesh.primitives() {
                    gather_primitive(&primitive, Mat4::IDENTITY, &buffers, &mut out)?;
                }
            }
        }
    }

    if out.indices.is_empty() {
        return Err("no triangle primitives".to_owned());
    }
    let vertex_count = out.positions.len();
    if let Some(bad) = out.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(format!("index {bad} out of range for {vertex_count} vertices"));
    }

    if !out.has_normals {
        return Ok(Mesh::from_triangles(&out.positions, out.indices));
    }
    let vertices = out
        .positions
        .iter()
        .zip(&out.normals)
        .map(|(p, n)| MeshVertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect();
    Ok(Mesh {
        vertices,
        indices: out.indices,
    })
}

fn gather_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Gathered,
) -> Result<(), String> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            gather_primitive(&primitive, world, buffers, out)?;
        }
    }
    for child in node.children() {
        gather_node(&child, world, buffers, out)?;
    }
    Ok(())
}

fn gather_primitive(
    primitive: &gltf::Primitive<'_>,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Gathered,
) -> Result<(), String> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        log::warn!("skipping {:?} primitive", primitive.mode());
        return Ok(());
    }
    let reader = primitive
        .reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
    let positions = reader
        .read_positions()
        .ok_or("triangle primitive without positions")?;

    let base = out.positions.len() as u32;
    out.positions
        .extend(positions.map(|p| world.transform_point3(Vec3::from_array(p))));
    let count = out.positions.len() as u32 - base;

    match reader.read_normals() {
        Some(normals) if out.has_normals => {
            let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
            out.normals.extend(normals.map(|n| {
                (normal_matrix * Vec3::from_array(n)).normalize_or(Vec3::Y)
            }));
        }
        _ => out.has_normals = false,
    }

    match reader.read_indices() {
        Some(indices) => out.indices.extend(indices.into_u32().map(|i| base + i)),
        None => out.indices.extend(base..base + count),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One triangle in the XY plane, no normals, under a node translated
    /// to z = 5. Buffer: three f32 VEC3 positions then three u16 indices.
    const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "mesh": 0, "translation": [0.0, 0.0, 5.0] }],
  "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1 }] }],
  "buffers": [{
    "byteLength": 44,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA="
  }],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 6 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
      "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
  ]
}"#;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("orbiter-loader-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn builtins_resolve_and_unknown_fail() {
        let loader = AssetLoader::new(".");
        let dart = pollster::block_on(loader.load_mesh("builtin:dart")).unwrap();
        assert_eq!(dart, Mesh::dart());
        assert!(pollster::block_on(loader.load_mesh("builtin:teapot")).is_err());
    }

    #[test]
    fn gltf_loads_with_node_transform_and_derived_normals() {
        let dir = temp_dir("gltf");
        std::fs::write(dir.join("tri.gltf"), TRIANGLE_GLTF).unwrap();

        let loader = AssetLoader::new(&dir);
        let mesh = pollster::block_on(loader.load_mesh("tri.gltf")).unwrap();

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        let positions: Vec<[f32; 3]> =
            mesh.vertices.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![[0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [0.0, 1.0, 5.0]]
        );
        for v in &mesh.vertices {
            assert!(Vec3::from_array(v.normal).abs_diff_eq(Vec3::Z, 1e-6));
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn unsupported_or_missing_files_fail_as_mesh_load() {
        let dir = temp_dir("errors");
        std::fs::write(dir.join("quad.obj"), "v 0 0 0\n").unwrap();
        std::fs::write(dir.join("broken.gltf"), "{ not json").unwrap();
        let loader = AssetLoader::new(&dir);

        for path in ["quad.obj", "missing.glb", "broken.gltf"] {
            let result = pollster::block_on(loader.load_mesh(path));
            assert!(
                matches!(result, Err(OrbiterError::MeshLoad(_))),
                "{path}: {result:?}"
            );
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
