//! Instanced trail-segment pipeline.
//!
//! Every segment is one instance. The vertex shader expands it into a quad
//! that covers the segment plus its half-width (and a pixel of slack for
//! antialiasing); the fragment shader measures the distance to the segment
//! and fades the edge, which gives round caps for free.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::TrailSegment;

/// Smallest instance buffer allocated, in segments.
const MIN_CAPACITY: usize = 256;

/// Per-instance vertex data, one per trail segment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct SegmentInstance {
    from: [f32; 2],
    to: [f32; 2],
    width: f32,
    color: [f32; 4],
}

impl From<&TrailSegment> for SegmentInstance {
    fn from(segment: &TrailSegment) -> Self {
        Self {
            from: segment.from.to_array(),
            to: segment.to.to_array(),
            width: segment.width,
            color: segment.color,
        }
    }
}

impl SegmentInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2,
        1 => Float32x2,
        2 => Float32,
        3 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Surface size uniform, used to map pixels to clip space.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct TrailParams {
    viewport: [f32; 2],
    _pad: [f32; 2],
}

/// GPU resources for drawing trail segments.
pub(crate) struct TrailPipeline {
    pipeline: wgpu::RenderPipeline,
    params_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    instance_buffer: wgpu::Buffer,
    /// Instance buffer size in segments.
    capacity: usize,
    /// Segments uploaded for the current frame.
    count: u32,
}

impl TrailPipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Trail Params Buffer"),
            contents: bytemuck::bytes_of(&TrailParams {
                viewport: [1.0, 1.0],
                _pad: [0.0; 2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Trail Bind Group Layout"),
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
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Trail Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: params_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Trail Shader"),
            source: wgpu::ShaderSource::Wgsl(TRAIL_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Trail Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Trail Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SegmentInstance::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let instance_buffer = create_instance_buffer(device, MIN_CAPACITY);

        Self {
            pipeline,
            params_buffer,
            bind_group,
            instance_buffer,
            capacity: MIN_CAPACITY,
            count: 0,
        }
    }

    /// Upload this frame's segments and the surface size.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        segments: &[SegmentInstance],
        viewport: [f32; 2],
    ) {
        if segments.len() > self.capacity {
            self.capacity = segments.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.capacity);
        }

        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::bytes_of(&TrailParams {
                viewport,
                _pad: [0.0; 2],
            }),
        );
        if !segments.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(segments));
        }
        self.count = segments.len() as u32;
    }

    /// Record the draw call for the uploaded segments.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        pass.draw(0..6, 0..self.count);
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Trail Instance Buffer"),
        size: (capacity * std::mem::size_of::<SegmentInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(crate) const TRAIL_SHADER: &str = r#"
struct TrailParams {
    viewport: vec2<f32>,
    pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> params: TrailParams;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    // Position relative to the segment start: x along, y across
    @location(0) local: vec2<f32>,
    // Segment length and stroke radius
    @location(1) @interpolate(flat) shape: vec2<f32>,
    @location(2) color: vec4<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) from_pos: vec2<f32>,
    @location(1) to_pos: vec2<f32>,
    @location(2) width: f32,
    @location(3) color: vec4<f32>,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(0.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(0.0,  1.0),
        vec2<f32>(0.0,  1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0,  1.0),
    );
    let corner = corners[vertex_index];

    let delta = to_pos - from_pos;
    let seg_len = length(delta);
    var dir = vec2<f32>(1.0, 0.0);
    if seg_len > 0.0001 {
        dir = delta / seg_len;
    }
    let normal = vec2<f32>(-dir.y, dir.x);

    let radius = width * 0.5;
    let extent = radius + 1.0;
    let along = mix(-extent, seg_len + extent, corner.x);
    let across = corner.y * extent;
    let pixel = from_pos + dir * along + normal * across;

    // Pixels are y-down, clip space is y-up
    let ndc = vec2<f32>(
        pixel.x / params.viewport.x * 2.0 - 1.0,
        1.0 - pixel.y / params.viewport.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    out.local = vec2<f32>(along, across);
    out.shape = vec2<f32>(seg_len, radius);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let seg_len = in.shape.x;
    let radius = in.shape.y;

    let outside = max(max(-in.local.x, in.local.x - seg_len), 0.0);
    let dist = length(vec2<f32>(outside, in.local.y));
    let coverage = 1.0 - smoothstep(radius - 0.5, radius + 0.5, dist);
    if coverage <= 0.0 {
        discard;
    }

    return vec4<f32>(in.color.rgb, in.color.a * coverage);
}
"#;
