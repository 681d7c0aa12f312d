//! A thin layer over wgpu-rs used to hand CPU-side meshes to the GPU.
//!
//! # Initialization
//! A [instance::WRenderInstanceData] holds the device and the queue used to create resources.
//! The viewer only uploads geometry, so the instance is created without any surface.
//!
//! ```ignore
//! let instance = create_headless_instance("Terrain viewer").await?;
//! ```
//!
//! # Buffers
//! A [buffer::WBuffer] is a block of GPU memory. Vertex and index buffers are created with their content.
//!
//! ```ignore
//! let vertex_buffer = WBuffer::new(&instance, "Terrain-vertex", BufferUsage::VERTEX, bytemuck::cast_slice(&vertices));
//! ```
//!
//! # Vertex layout
//! Every mesh uses the [vertex::WVertex] layout: position, normal and texture coordinates, 32 bytes per vertex.

pub mod buffer;
pub mod instance;
pub mod vertex;
