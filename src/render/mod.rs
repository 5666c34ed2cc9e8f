//! Forward renderer.
//!
//! One pipeline, one pass: every visible mesh node is drawn lambert-lit
//! against the scene background. GPU buffers are cached per geometry id;
//! the flipbook retires a geometry every few ticks, so entries that go
//! unused are pruned periodically.

use std::sync::Arc;

use bytemuck::Zeroable;
use glam::{Mat4, Vec3, Vec4};
use rustc_hash::FxHashMap;
use uuid::Uuid;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::errors::{ObjbookError, Result};
use crate::resources::Geometry;
use crate::scene::light::LightKind;
use crate::scene::{Camera, Scene};

/// Frames a cached GPU mesh may sit unused before pruning drops it.
const PRUNE_AFTER_FRAMES: u64 = 300;
/// How often the prune sweep runs, in frames.
const PRUNE_INTERVAL_FRAMES: u64 = 60;

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_projection: Mat4,
    camera_position: Vec4,
    ambient_color: Vec4,
    light_direction: Vec4,
    light_color: Vec4,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniforms {
    model_matrix: Mat4,
    normal_matrix: Mat4,
    base_color: Vec4,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: Vec3,
    normal: Vec3,
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Uploaded buffers for one geometry.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    object_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    last_used_frame: u64,
}

/// Main renderer.
pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,

    depth_format: wgpu::TextureFormat,
    depth_texture_view: wgpu::TextureView,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    pipeline: wgpu::RenderPipeline,

    meshes: FxHashMap<Uuid, GpuMesh>,
    frame_index: u64,
    size: winit::dpi::PhysicalSize<u32>,
}

impl Renderer {
    /// Initializes the GPU context and the mesh pipeline for `window`.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| ObjbookError::AdapterRequestFailed(e.to_string()))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                ..Default::default()
            })
            .await?;

        let config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or(ObjbookError::SurfaceConfigMissing)?;
        surface.configure(&device, &config);

        let depth_format = wgpu::TextureFormat::Depth32Float;
        let depth_texture_view = Self::create_depth_texture(&device, &config, depth_format);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[uniform_entry(0)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[uniform_entry(0)],
        });

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniforms"),
            contents: bytemuck::bytes_of(&FrameUniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[Some(&frame_layout), Some(&object_layout)],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRIBUTES,
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // Baked exports come with either winding; draw both sides.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: Some(true),
                depth_compare: Some(wgpu::CompareFunction::Less),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            device,
            queue,
            surface,
            config,
            depth_format,
            depth_texture_view,
            frame_buffer,
            frame_bind_group,
            object_layout,
            pipeline,
            meshes: FxHashMap::default(),
            frame_index: 0,
            size,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = winit::dpi::PhysicalSize::new(width, height);
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture_view =
                Self::create_depth_texture(&self.device, &self.config, self.depth_format);
        }
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        format: wgpu::TextureFormat,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Renders one frame of `scene` through `camera`.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) {
        if self.size.width == 0 || self.size.height == 0 {
            return;
        }
        self.frame_index += 1;

        let output = match self.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(output)
            | wgpu::CurrentSurfaceTexture::Suboptimal(output) => output,
            wgpu::CurrentSurfaceTexture::Lost => {
                self.resize(self.config.width, self.config.height);
                return;
            }
            other => {
                log::error!("render error: {other:?}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.update_frame_uniforms(scene, camera);

        // Upload pass: make sure every visible mesh has live GPU buffers and
        // a current object uniform.
        let mut draw_order: Vec<Uuid> = Vec::new();
        for (_, node) in scene.iter_meshes() {
            let Some(mesh) = node.mesh.as_ref() else {
                continue;
            };
            let id = mesh.geometry.uuid;
            if !self.meshes.contains_key(&id) {
                let gpu = self.upload_mesh(&mesh.geometry);
                self.meshes.insert(id, gpu);
            }

            let model_matrix = Mat4::from(*node.transform.matrix());
            let uniforms = ObjectUniforms {
                model_matrix,
                normal_matrix: model_matrix.inverse().transpose(),
                base_color: mesh.material.base_color,
            };
            if let Some(gpu) = self.meshes.get_mut(&id) {
                gpu.last_used_frame = self.frame_index;
                self.queue
                    .write_buffer(&gpu.object_buffer, 0, bytemuck::bytes_of(&uniforms));
            }
            draw_order.push(id);
        }

        let clear_color = wgpu::Color {
            r: f64::from(scene.background.x),
            g: f64::from(scene.background.y),
            b: f64::from(scene.background.z),
            a: f64::from(scene.background.w),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.frame_bind_group, &[]);
            for id in &draw_order {
                if let Some(gpu) = self.meshes.get(id) {
                    pass.set_bind_group(1, &gpu.bind_group, &[]);
                    pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
                    pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    pass.draw_indexed(0..gpu.index_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if self.frame_index % PRUNE_INTERVAL_FRAMES == 0 {
            self.prune();
        }
    }

    fn update_frame_uniforms(&self, scene: &Scene, camera: &Camera) {
        let mut ambient = Vec3::ZERO;
        let mut light_direction = Vec3::NEG_Y;
        let mut light_color = Vec3::ZERO;
        for light in &scene.lights {
            match light.kind {
                LightKind::Ambient => ambient += light.color * light.intensity,
                LightKind::Directional { direction } => {
                    light_direction = direction;
                    light_color = light.color * light.intensity;
                }
            }
        }

        let uniforms = FrameUniforms {
            view_projection: camera.view_projection_matrix(),
            camera_position: Vec3::from(camera.world_matrix.translation).extend(1.0),
            ambient_color: ambient.extend(1.0),
            light_direction: light_direction.extend(0.0),
            light_color: light_color.extend(1.0),
        };
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    fn upload_mesh(&self, geometry: &Geometry) -> GpuMesh {
        let positions = geometry.positions();
        let normals = geometry.normals();
        let vertices: Vec<Vertex> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| Vertex {
                position: *p,
                normal: normals.get(i).copied().unwrap_or(Vec3::Z),
            })
            .collect();

        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(geometry.indices()),
                usage: wgpu::BufferUsages::INDEX,
            });
        let object_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Object Uniforms"),
                contents: bytemuck::bytes_of(&ObjectUniforms::zeroed()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout: &self.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: object_buffer.as_entire_binding(),
            }],
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: geometry.index_count(),
            object_buffer,
            bind_group,
            last_used_frame: self.frame_index,
        }
    }

    /// Drops GPU meshes whose geometry left the scene a while ago.
    fn prune(&mut self) {
        let cutoff = self.frame_index.saturating_sub(PRUNE_AFTER_FRAMES);
        self.meshes.retain(|_, gpu| gpu.last_used_frame >= cutoff);
    }
}
