// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use log::debug;
use wgpu::util::DeviceExt;

use super::frame::RenderFrame;
use super::mesh::MeshBuilder;
use super::vertex::ColorVertex;

const INITIAL_VERTEX_CAPACITY: usize = 16 * 1024;
const INITIAL_INDEX_CAPACITY: usize = 48 * 1024;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    _padding: [f32; 2],
}

pub struct Renderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_buffer: wgpu::Buffer,
    index_capacity: usize,
    mesh: MeshBuilder,
    viewport_uniform_buffer: wgpu::Buffer,
    viewport_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        initial_width: f32,
        initial_height: f32,
    ) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Graph Shader Module"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let viewport_uniform = ViewportUniform {
            size: [initial_width, initial_height],
            _padding: [0.0; 2],
        };
        let viewport_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Viewport Uniform Buffer"),
            contents: bytemuck::bytes_of(&viewport_uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let viewport_bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("viewport_bind_group_layout"),
        });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &viewport_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_uniform_buffer.as_entire_binding(),
            }],
            label: Some("viewport_bind_group"),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Graph Pipeline Layout"),
            bind_group_layouts: &[&viewport_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Graph Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[ColorVertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = create_vertex_buffer(device, INITIAL_VERTEX_CAPACITY);
        let index_buffer = create_index_buffer(device, INITIAL_INDEX_CAPACITY);

        Self {
            render_pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            index_buffer,
            index_capacity: INITIAL_INDEX_CAPACITY,
            mesh: MeshBuilder::default(),
            viewport_uniform_buffer,
            viewport_bind_group,
        }
    }

    /// Buffers double until the frame fits; they never shrink.
    fn ensure_capacity(&mut self, device: &wgpu::Device) {
        let vertices_needed = self.mesh.vertices.len();
        if vertices_needed > self.vertex_capacity {
            while self.vertex_capacity < vertices_needed {
                self.vertex_capacity *= 2;
            }
            debug!("growing vertex buffer to {} vertices", self.vertex_capacity);
            self.vertex_buffer = create_vertex_buffer(device, self.vertex_capacity);
        }
        let indices_needed = self.mesh.indices.len();
        if indices_needed > self.index_capacity {
            while self.index_capacity < indices_needed {
                self.index_capacity *= 2;
            }
            debug!("growing index buffer to {} indices", self.index_capacity);
            self.index_buffer = create_index_buffer(device, self.index_capacity);
        }
    }

    pub fn render_frame(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        frame: &RenderFrame,
        screen_width: f32,
        screen_height: f32,
        clear_color: wgpu::Color,
    ) {
        let viewport_uniform = ViewportUniform {
            size: [screen_width, screen_height],
            _padding: [0.0; 2],
        };
        queue.write_buffer(&self.viewport_uniform_buffer, 0, bytemuck::bytes_of(&viewport_uniform));

        self.mesh.build_frame(frame);
        if !self.mesh.is_empty() {
            self.ensure_capacity(device);
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.mesh.vertices));
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&self.mesh.indices));
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Graph Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations { load: wgpu::LoadOp::Clear(clear_color), store: wgpu::StoreOp::Store },
            })],
            depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
        });

        if !self.mesh.is_empty() {
            let vertex_bytes = (self.mesh.vertices.len() * std::mem::size_of::<ColorVertex>()) as u64;
            let index_bytes = (self.mesh.indices.len() * std::mem::size_of::<u32>()) as u64;
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.viewport_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vertex_bytes));
            render_pass.set_index_buffer(self.index_buffer.slice(..index_bytes), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.mesh.indices.len() as u32, 0, 0..1);
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Graph Vertex Buffer"),
        size: (capacity * std::mem::size_of::<ColorVertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Graph Index Buffer"),
        size: (capacity * std::mem::size_of::<u32>()) as u64,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
