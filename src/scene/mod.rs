//! Scene graph: meshes, renderable nodes, lights and fog, plus the
//! [`Renderer`] boundary the frame loop draws through.
//!
//! The flight core never sees any of this. [`crate::engine::FlightEngine`]
//! copies the body pose into a [`Node`] and the chase pose into a
//! [`Camera`] once per frame; a [`Renderer`] then draws the result.

/// Async mesh loading (builtin catalogue and glTF files).
pub mod loader;
/// CPU-side meshes and procedural shapes.
pub mod mesh;
/// Renderable scene nodes.
pub mod node;

use glam::Vec3;

pub use loader::AssetLoader;
pub use mesh::{Mesh, MeshVertex};
pub use node::{Node, NodeId};

use crate::camera::core::Camera;
use crate::options::Options;

/// Handle to a mesh stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub(crate) usize);

/// Single directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Linear RGB colour.
    pub color: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
    /// Direction *towards* the light.
    pub direction: Vec3,
}

/// Uniform ambient term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// Linear RGB colour.
    pub color: [f32; 3],
    /// Intensity multiplier.
    pub intensity: f32,
}

/// Linear distance fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    /// Linear RGB colour blended in at `far`.
    pub color: [f32; 3],
    /// Distance where fog starts.
    pub near: f32,
    /// Distance where fog is opaque.
    pub far: f32,
}

/// Everything about the scene that is not a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneEnvironment {
    /// Framebuffer clear colour.
    pub clear_color: [f32; 3],
    /// Key light.
    pub directional: DirectionalLight,
    /// Ambient fill.
    pub ambient: AmbientLight,
    /// Distance fog.
    pub fog: Fog,
}

impl SceneEnvironment {
    /// Derive the environment from the lighting, fog and renderer options.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let lighting = &options.lighting;
        Self {
            clear_color: options.renderer.clear_color,
            directional: DirectionalLight {
                color: lighting.directional_color,
                intensity: lighting.directional_intensity,
                direction: Vec3::from_array(lighting.directional_direction)
                    .normalize_or(Vec3::Y),
            },
            ambient: AmbientLight {
                color: lighting.ambient_color,
                intensity: lighting.ambient_intensity,
            },
            fog: Fog {
                color: options.fog.color,
                near: options.fog.near,
                far: options.fog.far,
            },
        }
    }
}

/// Flat scene graph. Nodes and meshes are never removed, so ids stay valid
/// for the scene's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    meshes: Vec<Mesh>,
    nodes: Vec<Node>,
    /// Lights, fog and clear colour.
    pub environment: SceneEnvironment,
}

impl Scene {
    /// Empty scene with the given environment.
    #[must_use]
    pub fn new(environment: SceneEnvironment) -> Self {
        Self {
            meshes: Vec::new(),
            nodes: Vec::new(),
            environment,
        }
    }

    /// Store a mesh and return its handle.
    pub fn insert_mesh(&mut self, mesh: Mesh) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle(self.meshes.len() - 1)
    }

    /// Look up a mesh.
    #[must_use]
    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle.0)
    }

    /// Number of stored meshes.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Attach a node and return its id.
    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Mutable node lookup.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// All nodes with their ids, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

/// Node ids of the two objects the flight loop drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandle {
    /// The orbiting body.
    pub body: NodeId,
    /// The sphere it orbits.
    pub planet: NodeId,
}

/// Draws a scene from a camera. Invoked once per frame after the camera has
/// been updated.
pub trait Renderer {
    /// Failure type for a single frame.
    type Error;

    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Implementation-defined; a failed frame does not invalidate the scene.
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error>;
}

/// Renderer that draws nothing and records what it was asked to draw.
///
/// Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    last_camera: Option<Camera>,
    last_node_count: usize,
}

impl HeadlessRenderer {
    /// Fresh renderer with no frames recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Camera used for the most recent frame.
    #[must_use]
    pub fn last_camera(&self) -> Option<&Camera> {
        self.last_camera.as_ref()
    }

    /// Node count of the most recent frame.
    #[must_use]
    pub fn last_node_count(&self) -> usize {
        self.last_node_count
    }
}

impl Renderer for HeadlessRenderer {
    type Error = std::convert::Infallible;

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error> {
        self.frames += 1;
        self.last_camera = Some(camera.clone());
        self.last_node_count = scene.nodes().count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene::new(SceneEnvironment::from_options(&Options::default()))
    }

    #[test]
    fn ids_index_insertion_order() {
        let mut scene = scene();
        let sphere = scene.insert_mesh(Mesh::uv_sphere(8, 4));
        let cube = scene.insert_mesh(Mesh::cube());
        assert_eq!(scene.mesh_count(), 2);

        let a = scene.add(Node::new(sphere));
        let b = scene.add(Node::new(cube).with_scale(0.5));

        assert_eq!(scene.node(a).map(|n| n.mesh), Some(sphere));
        assert_eq!(scene.node(b).map(|n| n.scale), Some(0.5));
        let ids: Vec<NodeId> = scene.nodes().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(scene.mesh(cube).map(Mesh::triangle_count), Some(12));
    }

    #[test]
    fn node_mut_moves_node() {
        let mut scene = scene();
        let mesh = scene.insert_mesh(Mesh::cube());
        let id = scene.add(Node::new(mesh));
        if let Some(node) = scene.node_mut(id) {
            node.set_position(Vec3::new(1.0, 2.0, 3.0));
        }
        let model = scene.node(id).map(Node::model_matrix);
        assert_eq!(
            model.map(|m| m.w_axis.truncate()),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }

    #[test]
    fn environment_uses_option_defaults() {
        let env = SceneEnvironment::from_options(&Options::default());
        assert_eq!(env.clear_color, [1.0, 1.0, 1.0]);
        assert_eq!(env.ambient.intensity, 0.2);
        assert_eq!(env.fog.near, 10.0);
        assert_eq!(env.fog.far, 20.0);
        assert!((env.directional.direction.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn headless_renderer_records_frames() {
        let mut scene = scene();
        let mesh = scene.insert_mesh(Mesh::dart());
        let _ = scene.add(Node::new(mesh));
        let camera = Camera {
            eye: Vec3::Z,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 60.0,
            znear: 0.1,
            zfar: 20.0,
        };

        let mut renderer = HeadlessRenderer::new();
        assert!(renderer.render(&scene, &camera).is_ok());
        assert!(renderer.render(&scene, &camera).is_ok());

        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.last_node_count(), 1);
        assert_eq!(renderer.last_camera().map(|c| c.eye), Some(Vec3::Z));
    }
}
