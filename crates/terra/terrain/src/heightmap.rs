//! Elevation samples read from a grayscale image.

use std::path::Path;

use bevy::log::debug;
use image::DynamicImage;

use crate::{TerrainError, TerrainResult};

/// Single channel elevation image.
/// Each pixel is a height between 0 and 255, stored row by row.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl HeightField {
    /// Create a height field from raw luma values stored row by row.
    /// 
    /// # Errors
    /// 
    /// * `TerrainError::InvalidArgument` - The size is zero or does not match the data length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> TerrainResult<Self> {
        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidArgument(
                format!("heightmap has a degenerate size {}x{}", width, height)));
        }
        if data.len() != width as usize * height as usize {
            return Err(TerrainError::InvalidArgument(
                format!("heightmap of size {}x{} needs {} samples, got {}", width, height, width as usize * height as usize, data.len())));
        }
        Ok(Self { width, height, data })
    }

    /// Convert a decoded image to a height field, keeping only its luminance.
    pub fn from_image(image: &DynamicImage) -> TerrainResult<Self> {
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();
        Self::from_raw(width, height, luma.into_raw())
    }

    /// Decode an encoded image (png, jpeg, bmp) held in memory.
    pub fn from_bytes(bytes: &[u8]) -> TerrainResult<Self> {
        let image = image::load_from_memory(bytes)?;
        Self::from_image(&image)
    }

    /// Load and decode an image file.
    pub fn from_path(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let path = path.as_ref();
        debug!("Loading heightmap from {}.", path.display());
        let image = image::open(path)?;
        Self::from_image(&image)
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Height stored at column `x` and row `z`.
    /// 
    /// # Panics
    /// 
    /// When `x` or `z` is outside of the image.
    pub fn sample(&self, x: u32, z: u32) -> f32 {
        assert!(x < self.width && z < self.height, "sample ({}, {}) outside of {}x{} heightmap", x, z, self.width, self.height);
        self.data[z as usize * self.width as usize + x as usize] as f32
    }

    /// Height stored at column `x` and row `z`, or `None` outside of the image.
    pub fn try_sample(&self, x: u32, z: u32) -> Option<f32> {
        if x < self.width && z < self.height {
            Some(self.sample(x, z))
        } else {
            None
        }
    }
}
