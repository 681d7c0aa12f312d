//! Instance of the GPU device used to upload meshes.

use bevy::{log::{debug, info, warn, Level}, utils::tracing::span};
use wgpu::{Device, Limits};

pub type WLimits = Limits;

/// Error type of the render instance.
#[derive(Debug)]
pub enum WRenderError {
    /// No adapter matches the requested options.
    NoAdapter,
    /// The adapter refused to create a device.
    DeviceRequestFailed(wgpu::RequestDeviceError),
}

impl std::fmt::Display for WRenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WRenderError::NoAdapter => write!(f, "no compatible GPU adapter found"),
            WRenderError::DeviceRequestFailed(err) => write!(f, "failed to create device: {}", err),
        }
    }
}

impl std::error::Error for WRenderError {}

/// Data of the render instance.
pub struct WRenderInstanceData {
    /// Device of the instance.
    pub device: Device,
    /// Queue of the instance.
    pub queue: wgpu::Queue,
    /// Adapter of the instance.
    pub adapter: wgpu::Adapter,
    /// Instance of the GPU device.
    pub instance: wgpu::Instance,
}

impl std::fmt::Debug for WRenderInstanceData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderInstance")
            .field("adapter", &self.adapter.get_info().name)
            .finish()
    }
}

/// Create a new instance of the GPU device without any surface.
/// 
/// # Arguments
/// 
/// * `label` - Label of the instance.
/// 
/// # Errors
/// 
/// * `WRenderError::NoAdapter` - No adapter is available on this machine.
/// * `WRenderError::DeviceRequestFailed` - The device could not be created.
pub async fn create_headless_instance(label: &str) -> Result<WRenderInstanceData, WRenderError> {
    info!(label, "Creating render instance.");
    let _trace = span!(Level::INFO, "create_headless_instance").entered();

    // Set flags
    let flags = if cfg!(debug_assertions) {
        wgpu::InstanceFlags::DEBUG | wgpu::InstanceFlags::VALIDATION
    } else {
        wgpu::InstanceFlags::DISCARD_HAL_LABELS
    };

    // Create wgpu instance
    debug!(label, "Creating wgpu instance.");
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        flags,
        dx12_shader_compiler: wgpu::Dx12Compiler::Fxc,
        gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
    });

    // Retrieve adapter
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            ..Default::default()
        })
        .await
        .ok_or(WRenderError::NoAdapter)?;

    // Check adapter infos
    let adapter_info = adapter.get_info();
    info!("Using adapter named {} of {} type.", adapter_info.name, match adapter_info.device_type {
        wgpu::DeviceType::DiscreteGpu => "Discrete GPU",
        wgpu::DeviceType::IntegratedGpu => "Integrated GPU",
        wgpu::DeviceType::Cpu => "CPU",
        wgpu::DeviceType::VirtualGpu => "Virtual GPU",
        wgpu::DeviceType::Other => "Other",
    });
    if adapter_info.device_type == wgpu::DeviceType::Cpu {
        warn!("The selected adapter is using a driver that only supports software rendering, this will be very slow.");
    }

    // Create device instance and queue
    debug!(label, "Requesting device.");
    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some(label),
                required_features: wgpu::Features::empty(),
                required_limits: WLimits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        )
        .await
        .map_err(WRenderError::DeviceRequestFailed)?;

    debug!("Configured wgpu adapter Limits: {:#?}", device.limits());

    Ok(WRenderInstanceData {
        device,
        queue,
        adapter,
        instance,
    })
}
