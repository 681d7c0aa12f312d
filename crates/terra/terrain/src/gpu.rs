use bevy::log::debug;
use terra_wgpu::{buffer::{BufferUsage, WBuffer}, instance::WRenderInstanceData};

use crate::MeshAsset;

/// GPU side of a mesh. Owns the vertex and index buffers, released when dropped.
#[derive(Debug)]
pub struct GpuMesh {
    /// The label of the mesh.
    pub label: String,
    /// The vertex buffer.
    pub vertex_buffer: WBuffer,
    /// The index buffer.
    pub index_buffer: WBuffer,
    /// The number of indices.
    pub index_count: u32,
}

impl GpuMesh {
    /// Upload a mesh to the GPU.
    /// 
    /// # Arguments
    /// 
    /// * `render_instance` - The render instance.
    /// * `mesh` - The mesh stored on the CPU.
    pub fn new(render_instance: &WRenderInstanceData, mesh: &MeshAsset) -> Self {
        debug!(label = %mesh.label, "Loading mesh on the GPU.");

        let (vertex_bytes, index_bytes) = mesh_bytes(mesh);

        // Create vertex buffer
        let vertex_buffer = WBuffer::new(
            render_instance,
            format!("{}-vertex", mesh.label).as_str(),
            BufferUsage::VERTEX,
            vertex_bytes);

        // Create index buffer
        let index_buffer = WBuffer::new(
            render_instance,
            format!("{}-indices", mesh.label).as_str(),
            BufferUsage::INDEX,
            index_bytes);

        GpuMesh {
            label: mesh.label.clone(),
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Raw content of the vertex and index buffers of a mesh.
fn mesh_bytes(mesh: &MeshAsset) -> (&[u8], &[u8]) {
    (bytemuck::cast_slice(&mesh.vertices), bytemuck::cast_slice(&mesh.indices))
}


#[cfg(test)]
mod tests {
    use terra_wgpu::vertex::WVertex;

    use super::*;

    #[test]
    fn buffer_contents_follow_the_vertex_layout() {
        let vertices = vec![
            WVertex { position: [1.0, 2.0, 3.0], normal: [0.0, 1.0, 0.0], uv: [0.5, 0.25] },
            WVertex::default(),
            WVertex::default(),
        ];
        let mesh = MeshAsset::new("Triangle", vertices, vec![0, 1, 2]);
        let (vertex_bytes, index_bytes) = mesh_bytes(&mesh);

        assert_eq!(vertex_bytes.len(), 3 * WVertex::STRIDE);
        assert_eq!(index_bytes.len(), 3 * std::mem::size_of::<u32>());
        assert_eq!(&vertex_bytes[12..16], &0.0f32.to_ne_bytes());
        assert_eq!(&vertex_bytes[16..20], &1.0f32.to_ne_bytes());
        assert_eq!(&vertex_bytes[24..28], &0.5f32.to_ne_bytes());
        assert_eq!(&index_bytes[8..12], &2u32.to_ne_bytes());
    }

    #[test]
    fn empty_mesh_has_empty_buffers() {
        let mesh = MeshAsset::new("Empty", vec![], vec![]);
        let (vertex_bytes, index_bytes) = mesh_bytes(&mesh);
        assert!(vertex_bytes.is_empty() && index_bytes.is_empty());
    }
}
