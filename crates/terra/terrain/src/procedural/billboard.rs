use std::{f32::consts::{FRAC_PI_2, PI}, path::Path};

use bevy::math::Vec3;
use terra_wgpu::vertex::WVertex;

use crate::{normals::face_normal, MeshAsset, TerrainError, TerrainResult};

/// Texture coordinates of the corners, in top-left, top-right, bottom-right, bottom-left order.
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Triangles of a quad, referencing its corners.
const QUAD_INDICES: [u32; 6] = [2, 0, 1, 3, 0, 2];

/// A textured quad standing up in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Billboard {
    /// Corners in top-left, top-right, bottom-right, bottom-left order.
    pub corners: [Vec3; 4],
}

impl Billboard {
    /// Create a billboard from its four corners.
    pub fn from_corners(top_left: Vec3, top_right: Vec3, bottom_right: Vec3, bottom_left: Vec3) -> Self {
        Self { corners: [top_left, top_right, bottom_right, bottom_left] }
    }

    /// Create a billboard in the XY plane with the size of a texture.
    pub fn from_texture_size(width: f32, height: f32) -> Self {
        Self::from_corners(
            Vec3::new(0.0, height, 0.0),
            Vec3::new(width, height, 0.0),
            Vec3::new(width, 0.0, 0.0),
            Vec3::ZERO,
        )
    }

    /// Create a billboard with the size of the texture at `path`.
    /// 
    /// # Errors
    /// 
    /// * `TerrainError::ImageDecode` - The texture could not be opened or decoded.
    pub fn from_texture_path(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let (width, height) = image::image_dimensions(path)?;
        Ok(Self::from_texture_size(width as f32, height as f32))
    }

    /// Normal of the quad on the side its triangles are wound towards, zero if its corners are aligned.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c] = [QUAD_INDICES[0], QUAD_INDICES[1], QUAD_INDICES[2]].map(|i| self.corners[i as usize]);
        face_normal(a, b, c).normalize_or_zero()
    }

    /// Vertices of the quad, in corner order.
    pub fn vertices(&self) -> [WVertex; 4] {
        let normal = self.normal().to_array();
        let mut vertices = [WVertex::default(); 4];
        for (vertex, (corner, uv)) in vertices.iter_mut().zip(self.corners.iter().zip(CORNER_UVS)) {
            *vertex = WVertex { position: corner.to_array(), normal, uv };
        }
        vertices
    }

    /// Convert the billboard into a standalone mesh.
    pub fn to_mesh(&self) -> MeshAsset {
        MeshAsset::new("Billboard", self.vertices().to_vec(), QUAD_INDICES.to_vec())
    }
}


/// Billboards crossing each other around the vertical axis, to fake a volume from flat textures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillboardCloud {
    pub billboards: Vec<Billboard>,
}

impl BillboardCloud {
    /// Create a cloud with one billboard per texture size, rotated around the Y axis.
    /// Each billboard is centered on the axis and spans the width of its texture.
    pub fn from_texture_sizes(sizes: &[(f32, f32)]) -> Self {
        let count = sizes.len() as f32;
        let billboards = sizes.iter().enumerate()
            .map(|(i, &(width, height))| {
                let radius = width / 2.0;
                let angle = (2.0 * i as f32 * PI / count) / FRAC_PI_2;
                let (left_x, left_z) = (radius * angle.cos(), radius * angle.sin());
                let (right_x, right_z) = (radius * (PI + angle).cos(), radius * (PI + angle).sin());

                Billboard::from_corners(
                    Vec3::new(left_x, height, left_z),
                    Vec3::new(right_x, height, right_z),
                    Vec3::new(right_x, 0.0, right_z),
                    Vec3::new(left_x, 0.0, left_z),
                )
            })
            .collect();
        Self { billboards }
    }

    /// Create a cloud from texture files.
    /// 
    /// # Errors
    /// 
    /// * `TerrainError::ImageDecode` - A texture could not be opened or decoded.
    /// * `TerrainError::InvalidArgument` - No texture was given.
    pub fn from_texture_paths<P: AsRef<Path>>(paths: &[P]) -> TerrainResult<Self> {
        if paths.is_empty() {
            return Err(TerrainError::InvalidArgument("a billboard cloud needs at least one texture".into()));
        }
        let sizes = paths.iter()
            .map(|path| image::image_dimensions(path).map(|(w, h)| (w as f32, h as f32)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_texture_sizes(&sizes))
    }

    /// Merge every billboard into a single mesh.
    pub fn to_mesh(&self) -> MeshAsset {
        let mut vertices = Vec::with_capacity(4 * self.billboards.len());
        let mut indices = Vec::with_capacity(6 * self.billboards.len());
        for billboard in &self.billboards {
            let offset = vertices.len() as u32;
            vertices.extend_from_slice(&billboard.vertices());
            indices.extend(QUAD_INDICES.iter().map(|i| i + offset));
        }
        MeshAsset::new("Billboard cloud", vertices, indices)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_sized_billboard_faces_negative_z() {
        let billboard = Billboard::from_texture_size(4.0, 2.0);
        assert_eq!(billboard.corners[1], Vec3::new(4.0, 2.0, 0.0));
        assert_eq!(billboard.normal(), Vec3::NEG_Z);

        let mesh = billboard.to_mesh();
        assert_eq!(mesh.indices, vec![2, 0, 1, 3, 0, 2]);
        assert_eq!(mesh.vertices[2].uv, [1.0, 1.0]);
        assert_eq!(mesh.bounding_box.max, Vec3::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn normal_matches_both_triangles() {
        let billboards = [
            Billboard::from_texture_size(3.0, 5.0),
            Billboard::from_corners(Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 1.0), Vec3::ZERO),
        ];
        for billboard in billboards {
            let mesh = billboard.to_mesh();
            for triangle in mesh.indices.chunks_exact(3) {
                let [a, b, c] = [triangle[0], triangle[1], triangle[2]]
                    .map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
                let face = face_normal(a, b, c).normalize();
                assert!(face.abs_diff_eq(billboard.normal(), 1e-6));
                assert!(mesh.vertices.iter().all(|v| Vec3::from_array(v.normal).abs_diff_eq(face, 1e-6)));
            }
        }
    }

    #[test]
    fn odd_texture_width_keeps_its_full_span() {
        let cloud = BillboardCloud::from_texture_sizes(&[(5.0, 2.0)]);
        let [top_left, top_right, _, _] = cloud.billboards[0].corners;
        assert!((top_left.distance(top_right) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn aligned_corners_give_zero_normal() {
        let billboard = Billboard::from_corners(Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Vec3::X * 3.0);
        assert_eq!(billboard.normal(), Vec3::ZERO);
    }

    #[test]
    fn missing_texture_fails() {
        let result = Billboard::from_texture_path("does/not/exist.png");
        assert!(matches!(result, Err(TerrainError::ImageDecode(_))));
    }

    #[test]
    fn cloud_merges_billboards_with_offsets() {
        let cloud = BillboardCloud::from_texture_sizes(&[(2.0, 3.0), (2.0, 3.0), (4.0, 1.0)]);
        let mesh = cloud.to_mesh();
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.indices.len(), 18);
        assert_eq!(&mesh.indices[6..12], &[6, 4, 5, 7, 4, 6]);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn cloud_billboards_are_centered_on_the_axis() {
        let cloud = BillboardCloud::from_texture_sizes(&[(2.0, 3.0), (6.0, 1.0)]);
        for billboard in &cloud.billboards {
            let [top_left, top_right, bottom_right, bottom_left] = billboard.corners;
            let center = (top_left + top_right) / 2.0;
            assert!(center.x.abs() < 1e-5 && center.z.abs() < 1e-5);
            assert_eq!(top_left.y, top_right.y);
            assert_eq!(bottom_left.y, 0.0);
            assert_eq!(bottom_right.y, 0.0);
        }
        let width = cloud.billboards[1].corners[0].distance(cloud.billboards[1].corners[1]);
        assert!((width - 6.0).abs() < 1e-4);
    }

    #[test]
    fn empty_path_list_is_rejected() {
        let paths: [&str; 0] = [];
        assert!(matches!(BillboardCloud::from_texture_paths(&paths), Err(TerrainError::InvalidArgument(_))));
    }
}
