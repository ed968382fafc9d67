use std::sync::Arc;
use std::time::Instant;

use eyre::eyre;
use eyre::Context as _;
use imgui::FontSource;
use imgui_wgpu::Renderer;
use imgui_wgpu::RendererConfig;
use imgui_winit_support::HiDpiMode;
use imgui_winit_support::WinitPlatform;
use tracing::error;
use tracing::info;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::Event;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;
use winit::window::WindowId;

use crate::config::UiConfig;
use crate::demo_window::build_ui;
use crate::gpu::AcquireError;
use crate::gpu::GpuState;
use crate::ui_state::UiState;

/// Everything that only exists while the window does.
struct Running {
    window: Arc<Window>,
    gpu: GpuState,
    imgui: imgui::Context,
    platform: WinitPlatform,
    renderer: Renderer,
}

pub struct App {
    config: UiConfig,
    state: UiState,
    last_frame: Instant,
    running: Option<Running>,
    error: Option<eyre::Report>,
}

impl App {
    pub fn new(config: UiConfig) -> Self {
        Self {
            config,
            state: UiState::default(),
            last_frame: Instant::now(),
            running: None,
            error: None,
        }
    }

    /// The first error that stopped the event loop, if any.
    pub fn finish(self) -> eyre::Result<()> {
        match self.error {
            Some(report) => Err(report),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, report: eyre::Report) {
        error!("{report:?}");
        if self.error.is_none() {
            self.error = Some(report);
        }
        event_loop.exit();
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> eyre::Result<Running> {
        let attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .wrap_err("failed to create window")?,
        );

        let gpu = pollster::block_on(GpuState::new(window.clone(), self.config.frames_in_flight))?;

        let mut imgui = imgui::Context::create();
        imgui.set_ini_filename(None);
        let mut platform = WinitPlatform::new(&mut imgui);
        platform.attach_window(imgui.io_mut(), &window, HiDpiMode::Default);
        imgui
            .fonts()
            .add_font(&[FontSource::DefaultFontData { config: None }]);

        let renderer = Renderer::new(
            &mut imgui,
            &gpu.device,
            &gpu.queue,
            RendererConfig {
                texture_format: gpu.config.format,
                ..Default::default()
            },
        );

        info!(
            width = gpu.config.width,
            height = gpu.config.height,
            format = ?gpu.config.format,
            frames_in_flight = self.config.frames_in_flight,
            "window ready"
        );
        Ok(Running {
            window,
            gpu,
            imgui,
            platform,
            renderer,
        })
    }

    fn redraw(&mut self) -> eyre::Result<()> {
        let Some(running) = self.running.as_mut() else {
            return Ok(());
        };

        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        running.imgui.io_mut().update_delta_time(delta);

        running
            .platform
            .prepare_frame(running.imgui.io_mut(), &running.window)
            .wrap_err("failed to prepare imgui frame")?;

        let frame = match running.gpu.acquire() {
            Ok(frame) => frame,
            Err(AcquireError::Skipped) => return Ok(()),
            Err(AcquireError::Fatal(error)) => return Err(eyre!("surface error: {error}")),
        };

        let ui = running.imgui.new_frame();
        build_ui(ui, &mut self.state);
        running.platform.prepare_render(ui, &running.window);
        let draw_data = running.imgui.render();

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = running
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("imgui frame"),
            });

        let [r, g, b, a] = self.state.premultiplied_clear_color();
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("imgui pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            running
                .renderer
                .render(draw_data, &running.gpu.queue, &running.gpu.device, &mut rpass)
                .map_err(|e| eyre!("imgui render failed: {e:?}"))?;
        }

        running.gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                self.last_frame = Instant::now();
                self.running = Some(running);
            }
            Err(report) => self.fail(event_loop, report),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };
        if running.window.id() != window_id {
            return;
        }

        running.platform.handle_event(
            running.imgui.io_mut(),
            &running.window,
            &Event::<()>::WindowEvent {
                window_id,
                event: event.clone(),
            },
        );

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => running.gpu.resize(size),
            WindowEvent::RedrawRequested => {
                if let Err(report) = self.redraw() {
                    self.fail(event_loop, report);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }
}
