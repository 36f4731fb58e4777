use wgpu::util::DeviceExt;

//
// ──────────────────────────────────────────────────────────────
//   Full-screen quad
//
//   4 corners in clip space, two CCW triangles. The fragment
//   shader does all of the actual globe drawing.
// ──────────────────────────────────────────────────────────────
//

pub const QUAD_VERTICES: [[f32; 2]; 4] = [
  [-1.0, 1.0],  // 0 top left
  [1.0, 1.0],   // 1 top right
  [1.0, -1.0],  // 2 bottom right
  [-1.0, -1.0], // 3 bottom left
];

pub const QUAD_INDICES: [u16; 6] = [0, 3, 1, 2, 1, 3];

pub const QUAD_VERTEX_STRIDE: u64 = std::mem::size_of::<[f32; 2]>() as u64;

pub struct QuadMesh
{
  pub vertex_buffer: wgpu::Buffer,
  pub index_buffer: wgpu::Buffer,
  pub index_count: u32,
}

impl QuadMesh
{
  pub fn create(device: &wgpu::Device) -> Self
  {
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Quad Vertex Buffer"),
      contents: bytemuck::cast_slice(&QUAD_VERTICES),
      usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Quad Index Buffer"),
      contents: bytemuck::cast_slice(&QUAD_INDICES),
      usage: wgpu::BufferUsages::INDEX,
    });

    Self { vertex_buffer, index_buffer, index_count: QUAD_INDICES.len() as u32 }
  }

  pub fn vertex_layout() -> wgpu::VertexBufferLayout<'static>
  {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    wgpu::VertexBufferLayout {
      array_stride: QUAD_VERTEX_STRIDE,
      step_mode: wgpu::VertexStepMode::Vertex,
      attributes: &ATTRIBUTES,
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  fn signed_area(tri: &[u16]) -> f32
  {
    let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| QUAD_VERTICES[i as usize]);
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
  }

  #[test]
  fn both_triangles_face_forward()
  {
    for tri in QUAD_INDICES.chunks(3)
    {
      assert!(signed_area(tri) > 0.0, "triangle {tri:?} is clockwise and would be culled");
    }
  }

  #[test]
  fn quad_covers_clip_space()
  {
    let total: f32 = QUAD_INDICES.chunks(3).map(|tri| signed_area(tri) / 2.0).sum();
    assert_eq!(total, 4.0);
  }

  #[test]
  fn stride_is_two_floats()
  {
    assert_eq!(QUAD_VERTEX_STRIDE, 8);
    assert_eq!(QuadMesh::vertex_layout().attributes.len(), 1);
  }
}
