use std::sync::Arc;

use log::{debug, info};
use wgpu::util::DeviceExt;
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, RenderPipeline, ShaderModule, Surface,
    SurfaceConfiguration, TextureView,
};
use winit::window::Window;

use super::gpu_context::GpuContext;
use super::mesh::{vertex_layout, GpuMesh};
use crate::loaders::MeshData;
use crate::scene::ComposedFrame;
use crate::traits::renderer::DrawBackend;
use crate::types::{GlobalsUniform, LightsUniform, NodeUniform};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Forward renderer for the clock scene.
///
/// Owns the surface, depth buffer, the two pipelines (opaque and alpha
/// blended), the static lighting rig, and the uploaded meshes. Implements
/// [`DrawBackend`], so the orchestrator never sees wgpu types.
pub struct SceneRenderer {
    gpu: GpuContext,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    depth_view: TextureView,
    opaque_pipeline: RenderPipeline,
    blended_pipeline: RenderPipeline,
    globals_buffer: Buffer,
    frame_bind_group: BindGroup,
    meshes: Vec<GpuMesh>,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    /// Create the renderer and upload the given meshes. Mesh handles used
    /// by the scene index into `meshes` in the order passed here.
    pub fn new(window: Arc<Window>, meshes: &[MeshData], clear_color: [f32; 4]) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;
        let gpu = pollster::block_on(GpuContext::new_with_surface(&instance, &surface))?;

        let surface_config = Self::create_surface_config(&surface, &gpu, size.width, size.height);
        surface.configure(gpu.device(), &surface_config);

        let depth_view = Self::create_depth_view(gpu.device(), &surface_config);

        let shader = gpu
            .device()
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Scene Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
            });

        let (frame_layout, node_layout) = Self::create_bind_group_layouts(gpu.device());

        let globals_buffer = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Globals Buffer"),
                contents: bytemuck::cast_slice(&[GlobalsUniform {
                    view: glam::Mat4::IDENTITY.to_cols_array_2d(),
                    projection: glam::Mat4::IDENTITY.to_cols_array_2d(),
                    view_pos: [0.0; 3],
                    _pad: 0.0,
                }]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let lights_buffer = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lights Buffer"),
                contents: bytemuck::cast_slice(&[LightsUniform::default()]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let frame_bind_group = gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout =
            gpu.device()
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Scene Pipeline Layout"),
                    bind_group_layouts: &[&frame_layout, &node_layout],
                    push_constant_ranges: &[],
                });

        let opaque_pipeline = Self::create_pipeline(
            gpu.device(),
            &pipeline_layout,
            &shader,
            surface_config.format,
            false,
        );
        let blended_pipeline = Self::create_pipeline(
            gpu.device(),
            &pipeline_layout,
            &shader,
            surface_config.format,
            true,
        );

        let meshes = meshes
            .iter()
            .map(|data| GpuMesh::upload(gpu.device(), &node_layout, data))
            .collect();

        info!(
            "renderer ready: {}x{}, {:?}",
            surface_config.width, surface_config.height, surface_config.format
        );

        Ok(Self {
            gpu,
            surface,
            surface_config,
            depth_view,
            opaque_pipeline,
            blended_pipeline,
            globals_buffer,
            frame_bind_group,
            meshes,
            clear_color: wgpu::Color {
                r: f64::from(clear_color[0]),
                g: f64::from(clear_color[1]),
                b: f64::from(clear_color[2]),
                a: f64::from(clear_color[3]),
            },
        })
    }

    fn create_surface_config(
        surface: &Surface,
        gpu: &GpuContext,
        width: u32,
        height: u32,
    ) -> SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(gpu.adapter());
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn create_depth_view(device: &Device, config: &SurfaceConfiguration) -> TextureView {
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
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_bind_group_layouts(device: &Device) -> (BindGroupLayout, BindGroupLayout) {
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
            label: Some("frame_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let node_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("node_bind_group_layout"),
            entries: &[uniform_entry(0)],
        });

        (frame_layout, node_layout)
    }

    fn create_pipeline(
        device: &Device,
        layout: &wgpu::PipelineLayout,
        shader: &ShaderModule,
        format: wgpu::TextureFormat,
        blended: bool,
    ) -> RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(if blended {
                "Blended Scene Pipeline"
            } else {
                "Opaque Scene Pipeline"
            }),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(if blended {
                        wgpu::BlendState::ALPHA_BLENDING
                    } else {
                        wgpu::BlendState::REPLACE
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                // Glass reads depth but must not occlude the hands.
                depth_write_enabled: !blended,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }
}

impl DrawBackend for SceneRenderer {
    fn submit(&mut self, frame: &ComposedFrame) -> Result<()> {
        let globals = GlobalsUniform {
            view: frame.view.to_cols_array_2d(),
            projection: frame.projection.to_cols_array_2d(),
            view_pos: frame.eye.to_array(),
            _pad: 0.0,
        };
        self.gpu
            .queue()
            .write_buffer(&self.globals_buffer, 0, bytemuck::cast_slice(&[globals]));

        for node in &frame.nodes {
            let Some(mesh) = self.meshes.get(node.mesh.0) else {
                continue;
            };
            let uniform = NodeUniform {
                model: node.model.to_cols_array_2d(),
                base_color: mesh.base_color,
            };
            self.gpu
                .queue()
                .write_buffer(&mesh.node_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("surface lost, reconfiguring");
                self.surface
                    .configure(self.gpu.device(), &self.surface_config);
                return Err("surface lost; reconfigured for next frame".into());
            }
            Err(e) => return Err(Box::new(e)),
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for node in &frame.nodes {
                let Some(mesh) = self.meshes.get(node.mesh.0) else {
                    continue;
                };
                let pipeline = if node.blended {
                    &self.blended_pipeline
                } else {
                    &self.opaque_pipeline
                };
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
                render_pass.set_bind_group(1, &mesh.node_bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface
            .configure(self.gpu.device(), &self.surface_config);
        self.depth_view = Self::create_depth_view(self.gpu.device(), &self.surface_config);
    }

    fn adapter_summary(&self) -> String {
        let info = self.gpu.adapter_info();
        format!("{} ({:?}, {})", info.name, info.backend, info.driver)
    }
}
