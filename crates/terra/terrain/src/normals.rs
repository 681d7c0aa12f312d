//! Vertex normals synthesized from the face normals of the triangles.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};
use terra_wgpu::vertex::WVertex;

/// How the face normals of the triangles sharing a vertex are combined.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalStrategy {
    /// Add each face normal to the running normal and renormalize right away.
    /// The result depends on the order of the triangles.
    #[default]
    Incremental,
    /// Sum every face normal, then normalize once.
    Averaged,
}

/// Normal of the triangle `(a, b, c)`, anchored at its first vertex.
/// Not normalized: its length is twice the area of the triangle.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

/// Compute the normal of every vertex from the triangles listed in `indices`.
/// Vertices not used by any triangle keep a zero normal, meaning "undefined".
/// 
/// # Returns
/// 
/// The number of vertices used by a triangle whose normal still has a zero length.
pub fn compute_normals(vertices: &mut [WVertex], indices: &[u32], strategy: NormalStrategy) -> usize {
    let mut normals = vec![Vec3::ZERO; vertices.len()];
    let mut touched = vec![false; vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
        let face = face_normal(
            Vec3::from_array(vertices[a].position),
            Vec3::from_array(vertices[b].position),
            Vec3::from_array(vertices[c].position));

        for vertex in [a, b, c] {
            touched[vertex] = true;
            normals[vertex] = match strategy {
                NormalStrategy::Incremental => (normals[vertex] + face).normalize_or_zero(),
                NormalStrategy::Averaged => normals[vertex] + face,
            };
        }
    }

    if strategy == NormalStrategy::Averaged {
        for normal in normals.iter_mut() {
            *normal = normal.normalize_or_zero();
        }
    }

    let mut degenerate = 0;
    for ((vertex, normal), touched) in vertices.iter_mut().zip(normals).zip(touched) {
        if touched && normal == Vec3::ZERO {
            degenerate += 1;
        }
        vertex.normal = normal.to_array();
    }
    degenerate
}
