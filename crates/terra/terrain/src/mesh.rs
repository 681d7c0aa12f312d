use bevy::math::Vec3;
use terra_wgpu::vertex::WVertex;

/// Axis aligned bounding box of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelBoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl ModelBoundingBox {
    /// Smallest box containing every vertex. Empty meshes get a box at the origin.
    pub fn from_vertices(vertices: &[WVertex]) -> Self {
        let mut positions = vertices.iter().map(|v| Vec3::from_array(v.position));
        let Some(first) = positions.next() else {
            return Self::default();
        };
        let (min, max) = positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Self { min, max }
    }
}

/// A mesh stored on the CPU, ready to be uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    /// The label of the mesh.
    pub label: String,
    /// The list of vertices.
    pub vertices: Vec<WVertex>,
    /// The list of indices, three per triangle.
    pub indices: Vec<u32>,
    /// The bounding box of the vertices.
    pub bounding_box: ModelBoundingBox,
}

impl MeshAsset {
    pub fn new(label: &str, vertices: Vec<WVertex>, indices: Vec<u32>) -> Self {
        let bounding_box = ModelBoundingBox::from_vertices(&vertices);
        Self {
            label: label.to_string(),
            vertices,
            indices,
            bounding_box,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
