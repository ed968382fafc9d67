use std::sync::Arc;

use eyre::eyre;
use eyre::Context as _;
use tracing::info;
use tracing::warn;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// What the caller should do with a frame that could not be acquired.
#[derive(Debug)]
pub enum AcquireError {
    /// The surface was reconfigured; try again next frame.
    Skipped,
    /// Unrecoverable; the loop should exit.
    Fatal(wgpu::SurfaceError),
}

/// The surface, device and queue for one window.
pub struct GpuState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, frames_in_flight: u32) -> eyre::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .wrap_err("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| eyre!("no adapter can present to this window"))?;
        info!(adapter = ?adapter.get_info(), "selected adapter");

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .wrap_err("failed to create device")?;

        let size = window.inner_size();
        let mut config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or_else(|| eyre!("surface is not supported by the adapter"))?;
        config.present_mode = wgpu::PresentMode::Fifo;
        config.desired_maximum_frame_latency = frames_in_flight;
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    /// Reconfigures the surface. A zero-sized window keeps the old size.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn acquire(&mut self) -> Result<wgpu::SurfaceTexture, AcquireError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                Err(AcquireError::Fatal(wgpu::SurfaceError::OutOfMemory))
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("surface acquire timed out");
                Err(AcquireError::Skipped)
            }
            Err(error) => {
                warn!(%error, "surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                Err(AcquireError::Skipped)
            }
        }
    }
}
