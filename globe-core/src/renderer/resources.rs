use std::num::NonZeroU64;

use super::quad::QuadMesh;
use super::targets::DEPTH_FORMAT;
use crate::camera::{PayloadLayout, UniformPayload, ViewMode, PAYLOAD_BYTES};
use crate::error::GlobeError;
use crate::texture::{EarthImage, EarthTexture};

//
// ──────────────────────────────────────────────────────────────
//   GpuResourceSet
//
//   Built once. After construction only the uniform buffer's
//   bytes ever change.
//
//   Bind group 0:
//     binding 0 : filtering sampler
//     binding 1 : globe texture view
//     binding 2 : uniform payload
// ──────────────────────────────────────────────────────────────
//

pub struct GpuResourceSet
{
  pub pipeline: wgpu::RenderPipeline,
  pub bind_group: wgpu::BindGroup,
  pub uniform_buffer: wgpu::Buffer,
  pub quad: QuadMesh,

  _texture: EarthTexture,
  _sampler: wgpu::Sampler,
}

impl GpuResourceSet
{
  pub fn create(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    colour_format: wgpu::TextureFormat,
    sample_count: u32,
    mode: ViewMode,
    image: &EarthImage,
  ) -> Result<Self, GlobeError>
  {
    let layout = mode.layout();

    let quad = QuadMesh::create(device);
    let texture = EarthTexture::upload(device, queue, image)?;
    let sampler = create_sampler(device);
    let uniform_buffer = create_uniform_buffer(device, &layout);

    let bind_group_layout = create_bind_group_layout(device);
    let bind_group =
      create_bind_group(device, &bind_group_layout, &sampler, &texture.view, &uniform_buffer);

    let pipeline = create_pipeline(device, mode, colour_format, sample_count, &bind_group_layout);

    Ok(Self { pipeline, bind_group, uniform_buffer, quad, _texture: texture, _sampler: sampler })
  }

  pub fn upload(&self, queue: &wgpu::Queue, payload: &UniformPayload)
  {
    queue.write_buffer(&self.uniform_buffer, 0, payload.as_bytes());
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Builders
// ──────────────────────────────────────────────────────────────
//

fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler
{
  device.create_sampler(&wgpu::SamplerDescriptor {
    label: Some("Earth Sampler"),
    address_mode_u: wgpu::AddressMode::Repeat, // longitude wraps
    address_mode_v: wgpu::AddressMode::ClampToEdge,
    mag_filter: wgpu::FilterMode::Linear,
    min_filter: wgpu::FilterMode::Linear,
    ..Default::default()
  })
}

fn create_uniform_buffer(device: &wgpu::Device, layout: &PayloadLayout) -> wgpu::Buffer
{
  device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("Globe Uniform Buffer"),
    size: layout.buffer_size(),
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  })
}

fn create_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout
{
  device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Globe BGL"),
    entries: &[
      wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
      },
      wgpu::BindGroupLayoutEntry {
        binding: 1,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
          multisampled: false,
          view_dimension: wgpu::TextureViewDimension::D2,
          sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
      },
      wgpu::BindGroupLayoutEntry {
        binding: 2,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
          ty: wgpu::BufferBindingType::Uniform,
          has_dynamic_offset: false,
          min_binding_size: NonZeroU64::new(PAYLOAD_BYTES),
        },
        count: None,
      },
    ],
  })
}

fn create_bind_group(
  device: &wgpu::Device,
  layout: &wgpu::BindGroupLayout,
  sampler: &wgpu::Sampler,
  texture_view: &wgpu::TextureView,
  uniform_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup
{
  device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("Globe BG"),
    layout,
    entries: &[
      wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::Sampler(sampler) },
      wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(texture_view) },
      wgpu::BindGroupEntry { binding: 2, resource: uniform_buffer.as_entire_binding() },
    ],
  })
}

fn create_pipeline(
  device: &wgpu::Device,
  mode: ViewMode,
  colour_format: wgpu::TextureFormat,
  sample_count: u32,
  bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline
{
  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Globe Shader"),
    source: wgpu::ShaderSource::Wgsl(mode.shader_source().into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Globe Pipeline Layout"),
    bind_group_layouts: &[bind_group_layout],
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some(mode.name()),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &[QuadMesh::vertex_layout()],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: &shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format: colour_format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState {
      topology: wgpu::PrimitiveTopology::TriangleList,
      strip_index_format: None,
      front_face: wgpu::FrontFace::Ccw,
      cull_mode: Some(wgpu::Face::Back),
      unclipped_depth: false,
      polygon_mode: wgpu::PolygonMode::Fill,
      conservative: false,
    },
    depth_stencil: Some(wgpu::DepthStencilState {
      format: DEPTH_FORMAT,
      depth_write_enabled: true,
      depth_compare: wgpu::CompareFunction::Less,
      stencil: wgpu::StencilState::default(),
      bias: wgpu::DepthBiasState::default(),
    }),
    multisample: wgpu::MultisampleState { count: sample_count, ..Default::default() },
    multiview: None,
    cache: None,
  })
}
