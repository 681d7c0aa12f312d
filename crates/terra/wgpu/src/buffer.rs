//! Contains the buffer struct and its implementations.

use std::fmt::Formatter;
use bevy::{log::Level, utils::tracing::event};
use wgpu::util::DeviceExt;

use crate::instance::WRenderInstanceData;

/// Buffer usages.
pub type BufferUsage = wgpu::BufferUsages;

/// Create a buffer on the GPU.
/// 
/// # Example
/// 
/// ```ignore
/// // Create a new buffer holding the vertices
/// let buffer = WBuffer::new(&instance, "Terrain-vertex", BufferUsage::VERTEX, bytemuck::cast_slice(&vertices));
/// assert_eq!(buffer.size(), (vertices.len() * WVertex::STRIDE) as u64);
/// ```
pub struct WBuffer {
    pub label: String,
    pub buffer: wgpu::Buffer,
}

impl std::fmt::Debug for WBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("label", &self.label)
            .field("buffer_size", &self.buffer.size())
            .finish()
    }
}

impl WBuffer {
    /// Create a new buffer holding `content`.
    /// 
    /// # Arguments
    /// 
    /// * `instance` - The render instance.
    /// * `label` - The label of the buffer.
    /// * `usage` - The usage of the buffer (vertex, index, uniform, storage).
    /// * `content` - The content of the buffer. Its length is the size of the buffer.
    pub fn new(instance: &WRenderInstanceData, label: &str, usage: BufferUsage, content: &[u8]) -> Self {
        event!(Level::DEBUG, "Creating new buffer {} of {} bytes.", label, content.len());

        let buffer = instance.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(format!("{}-buffer", label).as_str()),
                contents: content,
                usage
            }
        );

        WBuffer {
            label: label.to_string(),
            buffer,
        }
    }

    /// Size of the buffer in bytes.
    pub fn size(&self) -> u64 {
        self.buffer.size()
    }
}
