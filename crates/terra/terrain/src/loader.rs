use bevy::{asset::{io::Reader, AssetLoader, LoadContext}, log::{debug, error}};

use crate::{TerrainError, TerrainMesh, TerrainSettings};

/// Load heightmap images as terrain meshes.
/// The loader settings are the [TerrainSettings] of the terrain.
#[derive(Default)]
pub struct TerrainLoader;

impl AssetLoader for TerrainLoader {
    type Asset = TerrainMesh;
    type Settings = TerrainSettings;
    type Error = TerrainError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        settings: &TerrainSettings,
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        debug!("Loading terrain on the CPU from {}.", load_context.asset_path());

        // Read the heightmap bytes
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        // Build the terrain
        TerrainMesh::from_bytes(&bytes, settings).inspect_err(|err| {
            error!("Could not load terrain {}: {}", load_context.asset_path(), err);
        })
    }

    fn extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg", "bmp"]
    }
}
