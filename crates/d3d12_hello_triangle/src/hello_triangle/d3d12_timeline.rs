use frame_pacing::FenceValue;
use frame_pacing::GpuTimeline;
use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::System::Threading::*;

/// A direct command queue paired with the fence it signals.
pub struct D3d12Timeline {
    command_queue: ID3D12CommandQueue,
    fence: ID3D12Fence,
    fence_event: HANDLE,
}

impl D3d12Timeline {
    pub fn new(device: &ID3D12Device, command_queue: &ID3D12CommandQueue) -> Result<Self> {
        let fence: ID3D12Fence = unsafe { device.CreateFence(0, D3D12_FENCE_FLAG_NONE)? };
        let fence_event = unsafe { CreateEventA(None, false, false, None)? };
        Ok(Self {
            command_queue: command_queue.clone(),
            fence,
            fence_event,
        })
    }
}

impl GpuTimeline for D3d12Timeline {
    type Error = Error;

    fn signal(&mut self, value: FenceValue) -> Result<()> {
        unsafe { self.command_queue.Signal(&self.fence, value.0) }
    }

    fn completed(&self) -> FenceValue {
        FenceValue(unsafe { self.fence.GetCompletedValue() })
    }

    fn wait_for(&mut self, value: FenceValue) -> Result<()> {
        unsafe {
            self.fence.SetEventOnCompletion(value.0, self.fence_event)?;
            if WaitForSingleObjectEx(self.fence_event, INFINITE, false) != WAIT_OBJECT_0 {
                return Err(Error::from_win32());
            }
        }
        Ok(())
    }
}

impl Drop for D3d12Timeline {
    fn drop(&mut self) {
        if !self.fence_event.is_invalid() {
            unsafe { CloseHandle(self.fence_event).ok() };
        }
    }
}
