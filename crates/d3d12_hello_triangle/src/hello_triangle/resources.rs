use frame_pacing::FrameRing;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::*;

use super::d3d12_timeline::D3d12Timeline;

/// Everything created once a window exists.
pub struct Resources {
    pub command_queue: ID3D12CommandQueue,
    pub swap_chain: IDXGISwapChain3,
    pub render_targets: Vec<ID3D12Resource>,
    /// One RTV per back buffer, then the offscreen texture's RTV last.
    pub rtv_heap: ID3D12DescriptorHeap,
    pub rtv_descriptor_size: u32,
    /// Shader-visible, holds the offscreen texture's SRV.
    pub srv_heap: ID3D12DescriptorHeap,
    pub viewport: D3D12_VIEWPORT,
    pub scissor_rect: RECT,
    /// Command allocators, one per back buffer, paced by the queue fence.
    pub frames: FrameRing<D3d12Timeline, ID3D12CommandAllocator>,
    pub root_signature: ID3D12RootSignature,
    pub triangle_pso: ID3D12PipelineState,
    pub composite_pso: ID3D12PipelineState,
    pub command_list: ID3D12GraphicsCommandList,
    pub screen_vertex_buffer: ID3D12Resource,
    pub screen_vbv: D3D12_VERTEX_BUFFER_VIEW,
    pub texture_vertex_buffer: ID3D12Resource,
    pub texture_vbv: D3D12_VERTEX_BUFFER_VIEW,
    pub offscreen_texture: ID3D12Resource,
}

impl Resources {
    pub fn rtv_handle(&self, index: usize) -> D3D12_CPU_DESCRIPTOR_HANDLE {
        rtv_handle_at(&self.rtv_heap, self.rtv_descriptor_size, index)
    }

    pub fn back_buffer_rtv(&self) -> D3D12_CPU_DESCRIPTOR_HANDLE {
        self.rtv_handle(self.frames.index())
    }

    pub fn offscreen_rtv(&self) -> D3D12_CPU_DESCRIPTOR_HANDLE {
        self.rtv_handle(self.render_targets.len())
    }

    pub fn back_buffer(&self) -> &ID3D12Resource {
        &self.render_targets[self.frames.index()]
    }

    pub fn viewport_size(&self) -> [f32; 2] {
        [self.viewport.Width, self.viewport.Height]
    }
}

pub fn rtv_handle_at(
    heap: &ID3D12DescriptorHeap,
    descriptor_size: u32,
    index: usize,
) -> D3D12_CPU_DESCRIPTOR_HANDLE {
    let start = unsafe { heap.GetCPUDescriptorHandleForHeapStart() };
    D3D12_CPU_DESCRIPTOR_HANDLE {
        ptr: start.ptr + index * descriptor_size as usize,
    }
}
