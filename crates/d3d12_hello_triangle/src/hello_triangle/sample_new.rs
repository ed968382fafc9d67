use windows::Win32::Graphics::Dxgi::IDXGIInfoQueue;

use super::create_device::create_device;
use super::sample::Sample;
use super::sample::WINDOW_SIZE;
use crate::command_line::SampleCommandLine;
use crate::scene::Scene;
use crate::windy_error::MyResult;

pub fn new(command_line: &SampleCommandLine) -> MyResult<(Sample, Option<IDXGIInfoQueue>)> {
    let (dxgi_factory, device, info_queue) = create_device(command_line)?;

    Ok((
        Sample {
            dxgi_factory,
            device,
            frames_in_flight: command_line.frames_in_flight,
            resources: None,
            window_size: WINDOW_SIZE,
            scene: Scene::default(),
        },
        info_queue,
    ))
}
