//! Terrain meshes built from heightmaps.

use std::path::Path;

use bevy::{log::{debug, info, info_span, warn}, prelude::*};
use terra_wgpu::vertex::WVertex;

use crate::{
    grid::{grid_indices, grid_vertices, GridSize},
    normals::compute_normals,
    HeightField, MeshAsset, ModelBoundingBox, TerrainError, TerrainResult, TerrainSettings, TerrainWarning,
};

/// Triangulated terrain surface with per-vertex normals and texture coordinates.
/// 
/// Vertices are stored row by row, indices hold two triangles per grid cell.
#[derive(Asset, TypePath, Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    /// The label of the terrain.
    pub label: String,
    /// Number of vertex columns and rows.
    pub grid: GridSize,
    /// The list of vertices.
    pub vertices: Vec<WVertex>,
    /// The list of indices.
    pub indices: Vec<u32>,
    /// The bounding box of the vertices.
    pub bounding_box: ModelBoundingBox,
    /// Non-fatal issues found while building.
    pub warnings: Vec<TerrainWarning>,
}

impl TerrainMesh {
    /// Build the terrain mesh of a heightmap.
    /// 
    /// # Arguments
    /// 
    /// * `field` - The heightmap.
    /// * `settings` - The precision, height scale, normal strategy and texture tiling.
    /// 
    /// # Errors
    /// 
    /// * `TerrainError::InvalidArgument` - The precision is zero or too large for the heightmap, or the tile size is zero.
    pub fn build(field: &HeightField, settings: &TerrainSettings) -> TerrainResult<Self> {
        let _span = info_span!("build_terrain", label = %settings.label, precision = settings.precision).entered();

        let grid = GridSize::decimate(field, settings.precision)?;
        let tile_size = settings.tile_size.unwrap_or((field.width(), field.height()));
        if tile_size.0 == 0 || tile_size.1 == 0 {
            return Err(TerrainError::InvalidArgument(
                format!("tile size {}x{} is degenerate", tile_size.0, tile_size.1)));
        }

        let (dropped_columns, dropped_rows) = (field.width() % settings.precision, field.height() % settings.precision);
        if dropped_columns > 0 || dropped_rows > 0 {
            debug!("Dropping the last {} columns and {} rows of the heightmap.", dropped_columns, dropped_rows);
        }

        let mut vertices = grid_vertices(field, grid, settings.precision, settings.height_scale, tile_size);
        let indices = grid_indices(grid);

        let mut warnings = Vec::new();
        let degenerate = compute_normals(&mut vertices, &indices, settings.normal_strategy);
        if degenerate > 0 {
            let warning = TerrainWarning::DegenerateNormals { count: degenerate };
            warn!("Terrain '{}': {}.", settings.label, warning);
            warnings.push(warning);
        }

        info!("Built terrain '{}' of {}x{} vertices and {} triangles.",
            settings.label, grid.width, grid.height, indices.len() / 3);

        Ok(TerrainMesh {
            label: settings.label.clone(),
            grid,
            bounding_box: ModelBoundingBox::from_vertices(&vertices),
            vertices,
            indices,
            warnings,
        })
    }

    /// Decode an image held in memory and build its terrain mesh.
    pub fn from_bytes(bytes: &[u8], settings: &TerrainSettings) -> TerrainResult<Self> {
        Self::build(&HeightField::from_bytes(bytes)?, settings)
    }

    /// Load an image file and build its terrain mesh.
    pub fn from_path(path: impl AsRef<Path>, settings: &TerrainSettings) -> TerrainResult<Self> {
        Self::build(&HeightField::from_path(path)?, settings)
    }
}

impl From<TerrainMesh> for MeshAsset {
    fn from(terrain: TerrainMesh) -> Self {
        MeshAsset {
            label: terrain.label,
            vertices: terrain.vertices,
            indices: terrain.indices,
            bounding_box: terrain.bounding_box,
        }
    }
}
