use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Direct3D12::ID3D12Device;
use windows::Win32::Graphics::Dxgi::IDXGIFactory4;
use windows::Win32::Graphics::Dxgi::IDXGIInfoQueue;

use super::resources::Resources;
use super::sample_bind_to_window;
use super::sample_new;
use super::sample_on_destroy;
use super::sample_render;
use crate::command_line::SampleCommandLine;
use crate::dx_sample::DXSample;
use crate::scene::Scene;
use crate::windy_error::MyResult;

pub const WINDOW_TITLE: &str = "D3D12 Hello Triangle";
pub const WINDOW_SIZE: (i32, i32) = (1280, 720);

pub struct Sample {
    pub dxgi_factory: IDXGIFactory4,
    pub device: ID3D12Device,
    pub frames_in_flight: u32,
    pub resources: Option<Resources>,
    pub window_size: (i32, i32),
    pub scene: Scene,
}

impl DXSample for Sample {
    fn new(command_line: &SampleCommandLine) -> MyResult<(Self, Option<IDXGIInfoQueue>)> {
        sample_new::new(command_line)
    }

    fn bind_to_window(&mut self, hwnd: &HWND) -> MyResult<()> {
        sample_bind_to_window::bind_to_window(self, hwnd)
    }

    fn on_destroy(&mut self) {
        sample_on_destroy::on_destroy(self)
    }

    fn update(&mut self) {
        self.scene.update();
    }

    fn render(&mut self) -> MyResult<()> {
        sample_render::render(self)
    }

    fn title(&self) -> String {
        WINDOW_TITLE.into()
    }

    fn window_size(&self) -> (i32, i32) {
        self.window_size
    }
}
