use windows::core::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::*;

use super::populate_command_list::populate_command_list;
use super::sample::Sample;
use crate::windy_error::MyResult;

pub fn render(sample: &mut Sample) -> MyResult<()> {
    let Some(resources) = &mut sample.resources else {
        return Ok(());
    };

    // Blocks until the GPU has finished the frame that last used this back
    // buffer's allocator.
    let command_allocator = resources.frames.begin_frame()?.clone();

    populate_command_list(resources, &command_allocator, &sample.scene)?;

    let command_lists = [Some(resources.command_list.cast::<ID3D12CommandList>()?)];
    unsafe { resources.command_queue.ExecuteCommandLists(&command_lists) };

    // Present the frame (vsync enabled with interval 1)
    unsafe { resources.swap_chain.Present(1, DXGI_PRESENT(0)) }.ok()?;

    let next_index = unsafe { resources.swap_chain.GetCurrentBackBufferIndex() } as usize;
    resources.frames.end_frame_at(next_index)?;
    Ok(())
}
