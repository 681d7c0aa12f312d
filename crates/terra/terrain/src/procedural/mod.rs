//! Meshes generated without any model file.

mod billboard;
mod waves;

pub use billboard::*;
pub use waves::*;
