//! wgpu implementation of the [`Renderer`] boundary.
//!
//! One pipeline draws every node: Lambert diffuse from the directional
//! light, a flat ambient term and linear distance fog toward the fog
//! colour. Meshes are uploaded the first time they are seen; each node owns
//! a small uniform buffer rewritten every frame.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::gpu::render_context::RenderContext;
use crate::scene::{
    Mesh, MeshHandle, MeshVertex, Node, Renderer, Scene, SceneEnvironment,
};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Per-frame uniform block (`Frame` in `scene.wgsl`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct FrameUniform {
    camera: CameraUniform,
    light_dir: [f32; 4],
    light_color: [f32; 4],
    ambient: [f32; 4],
    fog_color: [f32; 4],
    fog_range: [f32; 4],
}

impl FrameUniform {
    fn new(environment: &SceneEnvironment, camera: &Camera) -> Self {
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(camera);
        let light = &environment.directional;
        let ambient = &environment.ambient;
        let fog = &environment.fog;
        Self {
            camera: camera_uniform,
            light_dir: light.direction.extend(light.intensity).to_array(),
            light_color: rgba(light.color, 1.0),
            ambient: rgba(ambient.color, ambient.intensity),
            fog_color: rgba(fog.color, 1.0),
            fog_range: [fog.near, fog.far, 0.0, 0.0],
        }
    }
}

/// Per-node uniform block (`Node` in `scene.wgsl`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct NodeUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl NodeUniform {
    fn new(node: &Node) -> Self {
        Self {
            model: node.model_matrix().to_cols_array_2d(),
            color: rgba(node.color, 1.0),
        }
    }
}

fn rgba(rgb: [f32; 3], a: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], a]
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct GpuNode {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws a [`Scene`] into a window surface.
pub struct SceneRenderer {
    context: RenderContext,
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    node_layout: wgpu::BindGroupLayout,
    depth_view: wgpu::TextureView,
    /// Indexed by mesh handle; `None` for meshes with no triangles.
    meshes: Vec<Option<GpuMesh>>,
    /// Indexed by node id.
    nodes: Vec<GpuNode>,
}

impl SceneRenderer {
    /// Build the pipeline and per-frame resources on `context`.
    pub fn new(context: RenderContext) -> Self {
        let device = &context.device;
        let frame_layout = uniform_layout(device, "Frame Bind Group Layout");
        let node_layout = uniform_layout(device, "Node Bind Group Layout");

        let frame_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform Buffer"),
                contents: bytemuck::bytes_of(&FrameUniform::zeroed()),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Frame Bind Group"),
                layout: &frame_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: frame_buffer.as_entire_binding(),
                }],
            });

        let pipeline = create_pipeline(
            device,
            context.format(),
            &[&frame_layout, &node_layout],
        );
        let (width, height) = context.size();
        let depth_view = create_depth_view(device, width, height);

        Self {
            context,
            pipeline,
            frame_buffer,
            frame_bind_group,
            node_layout,
            depth_view,
            meshes: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// The GPU context this renderer draws with.
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Resize the surface and depth buffer. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth_view = create_depth_view(&self.context.device, width, height);
    }

    /// Upload meshes and create node buffers the GPU has not seen yet.
    fn sync_resources(&mut self, scene: &Scene) {
        let device = &self.context.device;
        while self.meshes.len() < scene.mesh_count() {
            let handle = MeshHandle(self.meshes.len());
            let gpu = scene.mesh(handle).and_then(|mesh| upload_mesh(device, mesh));
            self.meshes.push(gpu);
        }

        for (id, node) in scene.nodes() {
            let uniform = NodeUniform::new(node);
            if let Some(gpu) = self.nodes.get(id.0) {
                self.context.queue.write_buffer(
                    &gpu.buffer,
                    0,
                    bytemuck::bytes_of(&uniform),
                );
                continue;
            }
            let buffer =
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Node Uniform Buffer"),
                    contents: bytemuck::bytes_of(&uniform),
                    usage: wgpu::BufferUsages::UNIFORM
                        | wgpu::BufferUsages::COPY_DST,
                });
            let bind_group =
                device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Node Bind Group"),
                    layout: &self.node_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
            self.nodes.push(GpuNode { buffer, bind_group });
        }
    }
}

impl Renderer for SceneRenderer {
    type Error = wgpu::SurfaceError;

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error> {
        self.sync_resources(scene);
        let uniform = FrameUniform::new(&scene.environment, camera);
        self.context.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&uniform),
        );

        let frame = self.context.acquire()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let [r, g, b] = scene.environment.clear_color.map(f64::from);

        let mut encoder = self.context.encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r,
                                    g,
                                    b,
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for (id, node) in scene.nodes() {
                let (Some(Some(mesh)), Some(gpu_node)) =
                    (self.meshes.get(node.mesh.0), self.nodes.get(id.0))
                else {
                    continue;
                };
                pass.set_bind_group(1, &gpu_node.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(
                    mesh.index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX
                | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::include_wgsl!("scene.wgsl"));
    let pipeline_layout =
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Scene Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: size_of::<MeshVertex>()
                    as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &VERTEX_ATTRIBUTES,
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_depth_view(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn upload_mesh(device: &wgpu::Device, mesh: &Mesh) -> Option<GpuMesh> {
    if mesh.indices.is_empty() || mesh.vertices.is_empty() {
        log::warn!("skipping empty mesh");
        return None;
    }
    let vertex_buffer =
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
    let index_buffer =
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
    log::debug!(
        "uploaded mesh: {} vertices, {} triangles",
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Some(GpuMesh {
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
    })
}
