use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{normals::NormalStrategy, TerrainResult};

/// Settings used to turn a heightmap into a terrain mesh.
/// Also used as the settings of the terrain asset loader.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TerrainSettings {
    /// The label of the terrain mesh.
    pub label: String,
    /// Stride in source pixels between two consecutive vertices (must be at least 1).
    pub precision: u32,
    /// Factor applied to the grayscale intensity to get the vertex height.
    pub height_scale: f32,
    /// How the face normals are combined into vertex normals.
    pub normal_strategy: NormalStrategy,
    /// Size of the color texture, used to tile the texture coordinates.
    /// When unset, the heightmap size is used.
    pub tile_size: Option<(u32, u32)>,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            label: "Terrain".to_string(),
            precision: 1,
            height_scale: 1.0,
            normal_strategy: NormalStrategy::Incremental,
            tile_size: None,
        }
    }
}

impl TerrainSettings {
    /// Read the settings from a JSON string. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> TerrainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the settings from a JSON file. Missing fields take their default value.
    pub fn from_json_file(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Tile the texture coordinates over the color texture at `path`.
    /// Only the image header is read to get its size.
    pub fn with_texture(mut self, path: impl AsRef<Path>) -> TerrainResult<Self> {
        self.tile_size = Some(image::image_dimensions(path)?);
        Ok(self)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::TerrainError;

    #[test]
    fn missing_fields_take_defaults() {
        let settings = TerrainSettings::from_json_str(r#"{ "precision": 4, "normal_strategy": "Averaged" }"#).unwrap();
        assert_eq!(settings.precision, 4);
        assert_eq!(settings.normal_strategy, NormalStrategy::Averaged);
        assert_eq!(settings.label, "Terrain");
        assert_eq!(settings.height_scale, 1.0);
        assert_eq!(settings.tile_size, None);
    }

    #[test]
    fn negative_precision_is_rejected() {
        let result = TerrainSettings::from_json_str(r#"{ "precision": -2 }"#);
        assert!(matches!(result, Err(TerrainError::InvalidSettings(_))));
    }

    #[test]
    fn tile_size_reads_as_pair() {
        let settings = TerrainSettings::from_json_str(r#"{ "tile_size": [64, 32] }"#).unwrap();
        assert_eq!(settings.tile_size, Some((64, 32)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = TerrainSettings::from_json_file("does/not/exist/terrain.json");
        assert!(matches!(result, Err(TerrainError::Io(_))));
    }

    #[test]
    fn missing_texture_is_a_decode_error() {
        let result = TerrainSettings::default().with_texture("does/not/exist/color.png");
        assert!(matches!(result, Err(TerrainError::ImageDecode(_))));
    }
}
