use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Dxgi::IDXGIInfoQueue;

use crate::command_line::SampleCommandLine;
use crate::windy_error::MyResult;

/// Trait for DirectX samples that provides a common interface
/// for initialization, rendering, and window management.
pub trait DXSample {
    /// Creates a new sample instance with the given command line arguments
    fn new(command_line: &SampleCommandLine) -> MyResult<(Self, Option<IDXGIInfoQueue>)>
    where
        Self: Sized;

    /// Binds the sample to a window handle
    fn bind_to_window(&mut self, hwnd: &HWND) -> MyResult<()>;

    /// Drains the GPU. Called once before the sample is dropped.
    fn on_destroy(&mut self);

    fn update(&mut self) {}

    fn render(&mut self) -> MyResult<()> {
        Ok(())
    }

    fn on_key_up(&mut self, _key: u8) {}

    fn on_key_down(&mut self, _key: u8) {}

    fn title(&self) -> String {
        "DXSample".into()
    }

    fn window_size(&self) -> (i32, i32) {
        (640, 480)
    }
}
