use crate::camera::OrbitCamera;
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use std::collections::BTreeMap;
use vitrine_render::{RenderError, RenderView};
use vitrine_scene::{NodeKind, PrimitiveKind, Scene};
use wgpu::util::DeviceExt;

const SAMPLE_COUNT: u32 = 4;
const SHADOW_MAP_SIZE: u32 = 2048;
const MAX_INSTANCES_PER_KIND: usize = 256;
const MAX_CATCHERS: usize = 4;

/// Shadow map refresh policy.
///
/// `Static` renders the map once at startup and leaves it alone: the
/// decorative motion is subtle, and skipping the per-frame depth pass is
/// worth the slightly stale contact between object and shadow. Tunable
/// rather than guaranteed; switch to `EveryFrame` for exact shadows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRefresh {
    #[default]
    Static,
    EveryFrame,
}

/// Backend construction options derived from the surface configuration.
#[derive(Debug, Clone, Copy)]
pub struct RendererOptions {
    /// Initial camera eye, also the orbit rest pose.
    pub eye: Vec3,
    /// Install drag-to-orbit interaction.
    pub controls: bool,
    pub shadow_refresh: ShadowRefresh,
}

/// Acquired GPU handles.
pub struct GpuHandles {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

/// Request a high-performance adapter and device.
///
/// `None` from the adapter request means no hardware acceleration is
/// available; that is the initialization failure the surface boundary
/// exists for.
pub fn request_gpu(
    instance: &wgpu::Instance,
    compatible_surface: Option<&wgpu::Surface<'_>>,
) -> Result<GpuHandles, RenderError> {
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface,
        force_fallback_adapter: false,
    }))
    .ok_or(RenderError::NoAdapter)?;

    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("vitrine_device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
        },
        None,
    ))
    .map_err(|e| RenderError::ContextCreation(e.to_string()))?;

    tracing::info!(
        "GPU initialized with {} backend",
        adapter.get_info().backend.to_str()
    );
    Ok(GpuHandles {
        adapter,
        device,
        queue,
    })
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    light_vp: [[f32; 4]; 4],
    /// rgb * intensity; w = shadows enabled.
    ambient: [f32; 4],
    /// xyz direction toward the scene; w = intensity.
    sun: [f32; 4],
    point0_pos: [f32; 4],
    point0_color: [f32; 4],
    point1_pos: [f32; 4],
    point1_color: [f32; 4],
    camera_pos: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    /// rgb + opacity.
    color: [f32; 4],
    /// rgb * emissive intensity.
    emissive: [f32; 4],
    /// metalness, roughness, receive_shadow flag.
    params: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct CatcherInstance {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    /// opacity, falloff.
    params: [f32; 4],
}

/// Per-kind instance batch; shadow casters are ordered first so the
/// shadow pass can draw a prefix.
#[derive(Debug, Default)]
struct InstanceBatch {
    instances: Vec<InstanceData>,
    caster_count: usize,
}

/// Gather the light rig from the scene: first ambient, first directional,
/// first two point lights. Extra lights are ignored — the rig is fixed.
fn gather_lighting(scene: &Scene) -> (Globals, bool) {
    let mut globals = Globals {
        view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        light_vp: Mat4::IDENTITY.to_cols_array_2d(),
        ambient: [0.0; 4],
        sun: [0.0; 4],
        point0_pos: [0.0; 4],
        point0_color: [0.0; 4],
        point1_pos: [0.0; 4],
        point1_color: [0.0; 4],
        camera_pos: [0.0; 4],
    };
    let mut have_ambient = false;
    let mut have_sun = false;
    let mut shadows = false;
    let mut points = 0usize;

    for (_, node) in scene.nodes() {
        match &node.kind {
            NodeKind::AmbientLight { intensity } if !have_ambient => {
                globals.ambient = [*intensity, *intensity, *intensity, 0.0];
                have_ambient = true;
            }
            NodeKind::DirectionalLight { intensity, shadow } if !have_sun => {
                let pos = node.transform.position;
                let dir = (Vec3::ZERO - pos).normalize_or_zero();
                globals.sun = [dir.x, dir.y, dir.z, *intensity];
                if let Some(settings) = shadow {
                    shadows = true;
                    let extent = settings.extent;
                    let light_view = Mat4::look_at_rh(pos, Vec3::ZERO, Vec3::Y);
                    let light_proj =
                        Mat4::orthographic_rh(-extent, extent, -extent, extent, 0.1, 60.0);
                    globals.light_vp = (light_proj * light_view).to_cols_array_2d();
                }
                have_sun = true;
            }
            NodeKind::PointLight { intensity, color } if points < 2 => {
                let p = node.transform.position;
                let pos = [p.x, p.y, p.z, 1.0];
                let col = [
                    color.r * intensity,
                    color.g * intensity,
                    color.b * intensity,
                    0.0,
                ];
                if points == 0 {
                    globals.point0_pos = pos;
                    globals.point0_color = col;
                } else {
                    globals.point1_pos = pos;
                    globals.point1_color = col;
                }
                points += 1;
            }
            _ => {}
        }
    }
    globals.ambient[3] = if shadows { 1.0 } else { 0.0 };
    (globals, shadows)
}

/// Group mesh nodes by primitive kind into instance batches, shadow
/// casters first within each batch.
fn build_instances(scene: &Scene) -> BTreeMap<PrimitiveKind, InstanceBatch> {
    let mut batches: BTreeMap<PrimitiveKind, InstanceBatch> = BTreeMap::new();
    for (id, node) in scene.nodes() {
        let NodeKind::Mesh {
            primitive,
            material,
        } = &node.kind
        else {
            continue;
        };
        let batch = batches.entry(*primitive).or_default();
        if batch.instances.len() >= MAX_INSTANCES_PER_KIND {
            continue;
        }
        let Some(world) = scene.world_transform(id) else {
            continue;
        };
        let cols = world.to_cols_array_2d();
        let instance = InstanceData {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: [
                material.color.r,
                material.color.g,
                material.color.b,
                material.opacity,
            ],
            emissive: [
                material.emissive.r * material.emissive_intensity,
                material.emissive.g * material.emissive_intensity,
                material.emissive.b * material.emissive_intensity,
                0.0,
            ],
            params: [
                material.metalness,
                material.roughness,
                if material.receive_shadow { 1.0 } else { 0.0 },
                0.0,
            ],
        };
        if material.cast_shadow {
            batch.instances.insert(batch.caster_count, instance);
            batch.caster_count += 1;
        } else {
            batch.instances.push(instance);
        }
    }
    batches
}

fn build_catchers(scene: &Scene) -> Vec<CatcherInstance> {
    let mut catchers = Vec::new();
    for (id, node) in scene.nodes() {
        let NodeKind::ShadowCatcher {
            opacity,
            radius,
            falloff,
        } = node.kind
        else {
            continue;
        };
        if catchers.len() >= MAX_CATCHERS {
            break;
        }
        let Some(world) = scene.world_transform(id) else {
            continue;
        };
        let cols = (world * Mat4::from_scale(Vec3::splat(radius))).to_cols_array_2d();
        catchers.push(CatcherInstance {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            params: [opacity, falloff, 0.0, 0.0],
        });
    }
    catchers
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// wgpu renderer over the scene description.
pub struct WgpuSceneRenderer {
    mesh_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    catcher_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    main_bind_group: wgpu::BindGroup,
    aux_bind_group: wgpu::BindGroup,
    meshes: BTreeMap<PrimitiveKind, GpuMesh>,
    instance_buffers: BTreeMap<PrimitiveKind, wgpu::Buffer>,
    catcher_vertex_buffer: wgpu::Buffer,
    catcher_index_buffer: wgpu::Buffer,
    catcher_instance_buffer: wgpu::Buffer,
    shadow_view: wgpu::TextureView,
    msaa_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    shadow_refresh: ShadowRefresh,
    shadow_rendered: bool,
    /// Drag-to-orbit camera; `None` when interaction is disabled.
    pub orbit: Option<OrbitCamera>,
}

impl WgpuSceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        options: RendererOptions,
    ) -> Self {
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&Globals::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let shadow_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("shadow_map"),
            size: wgpu::Extent3d {
                width: SHADOW_MAP_SIZE,
                height: SHADOW_MAP_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let shadow_view = shadow_texture.create_view(&Default::default());
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("shadow_sampler"),
            compare: Some(wgpu::CompareFunction::LessEqual),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let main_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("main_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });
        let aux_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("aux_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let main_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("main_bind_group"),
            layout: &main_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&shadow_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });
        let aux_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("aux_bind_group"),
            layout: &aux_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let main_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("main_pipeline_layout"),
                bind_group_layouts: &[&main_layout],
                push_constant_ranges: &[],
            });
        let aux_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("aux_pipeline_layout"),
                bind_group_layouts: &[&aux_layout],
                push_constant_ranges: &[],
            });

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shadow_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SHADOW_SHADER.into()),
        });
        let catcher_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("catcher_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::CATCHER_SHADER.into()),
        });

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![
                0 => Float32x3,
                1 => Float32x3,
            ],
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                2 => Float32x4,
                3 => Float32x4,
                4 => Float32x4,
                5 => Float32x4,
                6 => Float32x4,
                7 => Float32x4,
                8 => Float32x4,
            ],
        };

        let mesh_pipeline = |label: &str, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&main_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &scene_shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[vertex_layout.clone(), instance_layout.clone()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &scene_shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: wgpu::TextureFormat::Depth32Float,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: SAMPLE_COUNT,
                    ..Default::default()
                },
                multiview: None,
                cache: None,
            })
        };
        let opaque_pipeline = mesh_pipeline("mesh_pipeline", true);
        let particle_pipeline = mesh_pipeline("particle_pipeline", false);

        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shadow_pipeline"),
            layout: Some(&aux_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_shadow"),
                compilation_options: Default::default(),
                buffers: &[vertex_layout.clone(), instance_layout.clone()],
            },
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let catcher_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("catcher_pipeline"),
            layout: Some(&aux_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &catcher_shader,
                entry_point: Some("vs_catcher"),
                compilation_options: Default::default(),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: (std::mem::size_of::<f32>() * 2) as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<CatcherInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            1 => Float32x4,
                            2 => Float32x4,
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &catcher_shader,
                entry_point: Some("fs_catcher"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: SAMPLE_COUNT,
                ..Default::default()
            },
            multiview: None,
            cache: None,
        });

        // Upload the four primitive meshes once.
        let mut meshes = BTreeMap::new();
        let mut instance_buffers = BTreeMap::new();
        for kind in [
            PrimitiveKind::Sphere,
            PrimitiveKind::Box,
            PrimitiveKind::Torus,
            PrimitiveKind::ParticleSphere,
        ] {
            let data = vitrine_scene::MeshData::for_primitive(kind);
            let vertices: Vec<Vertex> = data
                .positions
                .iter()
                .zip(&data.normals)
                .map(|(p, n)| Vertex {
                    position: *p,
                    normal: *n,
                })
                .collect();
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertex_buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_index_buffer"),
                contents: bytemuck::cast_slice(&data.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            meshes.insert(
                kind,
                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: data.indices.len() as u32,
                },
            );
            instance_buffers.insert(
                kind,
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("mesh_instance_buffer"),
                    size: (MAX_INSTANCES_PER_KIND * std::mem::size_of::<InstanceData>()) as u64,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                }),
            );
        }

        let catcher_corners: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
        let catcher_indices: [u32; 6] = [0, 1, 2, 2, 3, 0];
        let catcher_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("catcher_vertex_buffer"),
            contents: bytemuck::cast_slice(&catcher_corners),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let catcher_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("catcher_index_buffer"),
            contents: bytemuck::cast_slice(&catcher_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let catcher_instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("catcher_instance_buffer"),
            size: (MAX_CATCHERS * std::mem::size_of::<CatcherInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (msaa_view, depth_view) =
            Self::create_frame_targets(device, surface_format, width, height);

        Self {
            mesh_pipeline: opaque_pipeline,
            particle_pipeline,
            catcher_pipeline,
            shadow_pipeline,
            globals_buffer,
            main_bind_group,
            aux_bind_group,
            meshes,
            instance_buffers,
            catcher_vertex_buffer,
            catcher_index_buffer,
            catcher_instance_buffer,
            shadow_view,
            msaa_view,
            depth_view,
            surface_format,
            shadow_refresh: options.shadow_refresh,
            shadow_rendered: false,
            orbit: options.controls.then(|| OrbitCamera::from_eye(options.eye)),
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (msaa_view, depth_view) =
            Self::create_frame_targets(device, self.surface_format, width, height);
        self.msaa_view = msaa_view;
        self.depth_view = depth_view;
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Request a one-shot shadow map refresh (only meaningful with
    /// `ShadowRefresh::Static`).
    pub fn refresh_shadows(&mut self) {
        self.shadow_rendered = false;
    }

    /// Render one frame of the scene into `target`.
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        scene: &Scene,
        view: &RenderView,
    ) -> Result<(), RenderError> {
        let (mut globals, shadows) = gather_lighting(scene);

        let eye = match &self.orbit {
            Some(orbit) => orbit.eye(),
            None => view.eye,
        };
        let camera_view = Mat4::look_at_rh(eye, view.target, Vec3::Y);
        let vp = view.projection_matrix() * camera_view;
        globals.view_proj = vp.to_cols_array_2d();
        globals.camera_pos = [eye.x, eye.y, eye.z, 1.0];
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let batches = build_instances(scene);
        for (kind, batch) in &batches {
            if !batch.instances.is_empty() {
                let buffer = &self.instance_buffers[kind];
                queue.write_buffer(buffer, 0, bytemuck::cast_slice(&batch.instances));
            }
        }
        let catchers = build_catchers(scene);
        if !catchers.is_empty() {
            queue.write_buffer(
                &self.catcher_instance_buffer,
                0,
                bytemuck::cast_slice(&catchers),
            );
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        let refresh_shadow = shadows
            && (self.shadow_refresh == ShadowRefresh::EveryFrame || !self.shadow_rendered);
        if refresh_shadow {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("shadow_pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            pass.set_pipeline(&self.shadow_pipeline);
            pass.set_bind_group(0, &self.aux_bind_group, &[]);
            for (kind, batch) in &batches {
                if batch.caster_count == 0 {
                    continue;
                }
                let mesh = &self.meshes[kind];
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.instance_buffers[kind].slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..batch.caster_count as u32);
            }
            self.shadow_rendered = true;
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa_view,
                    resolve_target: Some(target),
                    ops: wgpu::Operations {
                        // Transparent clear: the host page shows through.
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if !catchers.is_empty() {
                pass.set_pipeline(&self.catcher_pipeline);
                pass.set_bind_group(0, &self.aux_bind_group, &[]);
                pass.set_vertex_buffer(0, self.catcher_vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, self.catcher_instance_buffer.slice(..));
                pass.set_index_buffer(
                    self.catcher_index_buffer.slice(..),
                    wgpu::IndexFormat::Uint32,
                );
                pass.draw_indexed(0..6, 0, 0..catchers.len() as u32);
            }

            // Opaque primitives first, then the translucent particles.
            for translucent in [false, true] {
                for (kind, batch) in &batches {
                    let is_particles = *kind == PrimitiveKind::ParticleSphere;
                    if is_particles != translucent || batch.instances.is_empty() {
                        continue;
                    }
                    pass.set_pipeline(if translucent {
                        &self.particle_pipeline
                    } else {
                        &self.mesh_pipeline
                    });
                    pass.set_bind_group(0, &self.main_bind_group, &[]);
                    let mesh = &self.meshes[kind];
                    pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    pass.set_vertex_buffer(1, self.instance_buffers[kind].slice(..));
                    pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..mesh.index_count, 0, 0..batch.instances.len() as u32);
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    fn create_frame_targets(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> (wgpu::TextureView, wgpu::TextureView) {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };
        let msaa = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa_color"),
            size,
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size,
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        (
            msaa.create_view(&Default::default()),
            depth.create_view(&Default::default()),
        )
    }
}
