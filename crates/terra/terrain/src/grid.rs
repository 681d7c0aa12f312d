//! Decimated grid of vertices and triangles laid over a heightmap.

use serde::{Deserialize, Serialize};
use terra_wgpu::vertex::WVertex;

use crate::{HeightField, TerrainError, TerrainResult};

/// Number of vertex columns and rows of a terrain grid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl GridSize {
    /// Size of the grid sampling `field` every `precision` pixels.
    /// The last partial step of each axis is dropped.
    /// 
    /// # Errors
    /// 
    /// * `TerrainError::InvalidArgument` - The precision is zero, larger than the heightmap, or the grid is too large to be indexed with `u32`.
    pub fn decimate(field: &HeightField, precision: u32) -> TerrainResult<Self> {
        if precision == 0 {
            return Err(TerrainError::InvalidArgument("precision must be at least 1".to_string()));
        }

        let size = GridSize {
            width: field.width() / precision,
            height: field.height() / precision,
        };
        if size.width == 0 || size.height == 0 {
            return Err(TerrainError::InvalidArgument(format!(
                "precision {} is larger than the {}x{} heightmap",
                precision, field.width(), field.height())));
        }
        if size.vertex_count() > u32::MAX as usize {
            return Err(TerrainError::InvalidArgument(format!(
                "grid of {}x{} vertices cannot be indexed", size.width, size.height)));
        }
        Ok(size)
    }

    pub fn vertex_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of indices of the grid: two triangles per cell.
    pub fn index_count(&self) -> usize {
        6 * self.width.saturating_sub(1) as usize * self.height.saturating_sub(1) as usize
    }

    /// Index of the vertex at `column` and `row`.
    pub fn index(&self, column: u32, row: u32) -> u32 {
        row * self.width + column
    }
}

/// Create one vertex every `precision` pixels, row by row.
/// Normals are left to zero.
/// 
/// # Arguments
/// 
/// * `field` - The heightmap.
/// * `size` - The decimated grid size, see [GridSize::decimate].
/// * `precision` - Stride in pixels between two vertices.
/// * `height_scale` - Factor applied to the sampled heights.
/// * `tile_size` - Size of the color texture. The texture coordinates are the pixel coordinates wrapped on this size.
pub fn grid_vertices(field: &HeightField, size: GridSize, precision: u32, height_scale: f32, tile_size: (u32, u32)) -> Vec<WVertex> {
    let mut vertices = Vec::with_capacity(size.vertex_count());
    for row in 0..size.height {
        let z = row * precision;
        for column in 0..size.width {
            let x = column * precision;
            vertices.push(WVertex {
                position: [x as f32, field.sample(x, z) * height_scale, z as f32],
                normal: [0.0; 3],
                uv: [(x % tile_size.0) as f32, (z % tile_size.1) as f32],
            });
        }
    }
    vertices
}

/// Create the indices of the two triangles of every cell.
/// Each cell is split along its top-left to bottom-right diagonal.
pub fn grid_indices(size: GridSize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(size.index_count());
    for row in 0..size.height.saturating_sub(1) {
        for column in 0..size.width.saturating_sub(1) {
            let top_left = size.index(column, row);
            let top_right = size.index(column + 1, row);
            let bot_right = size.index(column + 1, row + 1);
            let bot_left = size.index(column, row + 1);

            // First triangle of the quad
            indices.extend_from_slice(&[bot_right, top_right, top_left]);

            // Second triangle of the quad
            indices.extend_from_slice(&[top_left, bot_left, bot_right]);
        }
    }
    indices
}


#[cfg(test)]
mod tests {
    use super::*;

    fn field(width: u32, height: u32) -> HeightField {
        let data = (0..width * height).map(|i| (i % 256) as u8).collect();
        HeightField::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn decimation_floors_each_axis() {
        let size = GridSize::decimate(&field(10, 7), 3).unwrap();
        assert_eq!(size, GridSize { width: 3, height: 2 });
    }

    #[test]
    fn zero_precision_is_invalid() {
        assert!(matches!(GridSize::decimate(&field(4, 4), 0), Err(TerrainError::InvalidArgument(_))));
    }

    #[test]
    fn precision_larger_than_image_is_invalid() {
        assert!(matches!(GridSize::decimate(&field(4, 8), 5), Err(TerrainError::InvalidArgument(_))));
    }

    #[test]
    fn vertices_sample_every_step() {
        let field = field(5, 5);
        let size = GridSize::decimate(&field, 2).unwrap();
        let vertices = grid_vertices(&field, size, 2, 0.5, (3, 3));

        assert_eq!(vertices.len(), 4);
        // Row 1, column 1 samples pixel (2, 2)
        assert_eq!(vertices[3].position, [2.0, field.sample(2, 2) * 0.5, 2.0]);
        // Texture coordinates wrap on the tile size
        assert_eq!(vertices[3].uv, [2.0, 2.0]);
        assert_eq!(vertices[1].uv, [2.0, 0.0]);
    }

    #[test]
    fn texture_coordinates_repeat() {
        let field = field(8, 1);
        let size = GridSize::decimate(&field, 1).unwrap();
        let vertices = grid_vertices(&field, size, 1, 1.0, (4, 4));
        let us: Vec<f32> = vertices.iter().map(|v| v.uv[0]).collect();
        assert_eq!(us, vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn cell_triangles_share_the_diagonal() {
        let indices = grid_indices(GridSize { width: 2, height: 2 });
        assert_eq!(indices, vec![3, 1, 0, 0, 2, 3]);
    }

    #[test]
    fn single_row_has_no_triangles() {
        let size = GridSize { width: 5, height: 1 };
        assert!(grid_indices(size).is_empty());
        assert_eq!(size.index_count(), 0);
    }
}
