use thiserror::Error;

/// Error that can occur while building a terrain or a procedural mesh.
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("Could not decode image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("Could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),
}

pub type TerrainResult<T> = Result<T, TerrainError>;

/// Non-fatal issue found while building a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainWarning {
    /// Vertices used by at least one triangle whose normal has a zero length.
    DegenerateNormals { count: usize },
}

impl std::fmt::Display for TerrainWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainWarning::DegenerateNormals { count } =>
                write!(f, "{} vertices have a zero-length normal", count),
        }
    }
}
