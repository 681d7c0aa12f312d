//! Vertex structure and layout for a mesh.

use std::mem::{offset_of, size_of};

/// Describe the vertex structure of a mesh.
/// 
/// # Fields
/// 
/// * `position` - The position of the vertex (location 0, offset 0).
/// * `normal`   - The normal of the vertex (location 1, offset 12).
/// * `uv`       - The texture coordinates of the vertex (location 2, offset 24).
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable, Debug, Default, PartialEq)]
pub struct WVertex {
    /// The position of the vertex.
    pub position: [f32; 3],
    /// The normal of the vertex (normalized, or zero when undefined).
    pub normal: [f32; 3],
    /// The texture coordinates of the vertex. Values above 1.0 repeat the texture.
    pub uv: [f32; 2],
}

impl WVertex {
    /// Size of a vertex in bytes.
    pub const STRIDE: usize = size_of::<WVertex>();

    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        wgpu::VertexAttribute { // Position
            offset: offset_of!(WVertex, position) as wgpu::BufferAddress,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute { // Normal
            offset: offset_of!(WVertex, normal) as wgpu::BufferAddress,
            shader_location: 1,
            format: wgpu::VertexFormat::Float32x3,
        },
        wgpu::VertexAttribute { // UV
            offset: offset_of!(WVertex, uv) as wgpu::BufferAddress,
            shader_location: 2,
            format: wgpu::VertexFormat::Float32x2,
        },
    ];

    /// Describe the layout of the vertex.
    /// 
    /// # Returns
    /// 
    /// * `wgpu::VertexBufferLayout` - The layout of the vertex.
    pub fn describe<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
