//! Build renderable meshes from grayscale heightmaps.
//!
//! A heightmap is decimated into a regular grid of vertices, two triangles are emitted per grid
//! cell, and vertex normals are computed from the triangles sharing each vertex.
//!
//! ```ignore
//! let settings = TerrainSettings { precision: 2, ..Default::default() };
//! let terrain = TerrainMesh::from_path("res/heightmap.png", &settings)?;
//! let mesh: MeshAsset = terrain.into();
//! ```

mod error;
mod grid;
mod heightmap;
mod loader;
mod mesh;
mod settings;
mod terrain;

pub mod gpu;
pub mod normals;
pub mod procedural;

use bevy::prelude::*;

pub use error::*;
pub use grid::*;
pub use heightmap::*;
pub use loader::*;
pub use mesh::*;
pub use settings::*;
pub use terrain::*;

/// Registers the terrain asset and its heightmap loader.
pub struct TerrainPlugin;
impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_asset::<TerrainMesh>()
            .init_asset_loader::<TerrainLoader>();
    }
}
