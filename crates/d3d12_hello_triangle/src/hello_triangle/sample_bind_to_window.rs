use frame_pacing::FrameRing;
use tracing::debug;
use windows::core::*;
use windows::Win32::Foundation::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;
use windows::Win32::Graphics::Dxgi::*;

use super::create_offscreen_target::create_offscreen_target;
use super::create_pipeline_state::create_pipeline_state;
use super::create_pipeline_state::PipelineKind;
use super::create_pipeline_state::RENDER_TARGET_FORMAT;
use super::create_root_signature::create_root_signature;
use super::create_vertex_buffer::create_vertex_buffer;
use super::d3d12_timeline::D3d12Timeline;
use super::resources::rtv_handle_at;
use super::resources::Resources;
use super::sample::Sample;
use crate::scene::triangle;
use crate::scene::SCREEN_COLORS;
use crate::scene::TEXTURE_COLORS;
use crate::windy_error::MyResult;

pub fn bind_to_window(sample: &mut Sample, hwnd: &HWND) -> MyResult<()> {
    let device = &sample.device;
    let frame_count = sample.frames_in_flight;

    let command_queue: ID3D12CommandQueue = unsafe {
        device.CreateCommandQueue(&D3D12_COMMAND_QUEUE_DESC {
            Type: D3D12_COMMAND_LIST_TYPE_DIRECT,
            ..Default::default()
        })?
    };

    let (width, height) = sample.window_size;

    let swap_chain_desc = DXGI_SWAP_CHAIN_DESC1 {
        BufferCount: frame_count,
        Width: width as u32,
        Height: height as u32,
        Format: RENDER_TARGET_FORMAT,
        BufferUsage: DXGI_USAGE_RENDER_TARGET_OUTPUT,
        SwapEffect: DXGI_SWAP_EFFECT_FLIP_DISCARD,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        ..Default::default()
    };

    let swap_chain: IDXGISwapChain3 = unsafe {
        sample.dxgi_factory.CreateSwapChainForHwnd(
            &command_queue,
            *hwnd,
            &swap_chain_desc,
            None,
            None,
        )?
    }
    .cast()?;

    // This sample does not support fullscreen transitions.
    unsafe {
        sample
            .dxgi_factory
            .MakeWindowAssociation(*hwnd, DXGI_MWA_NO_ALT_ENTER)?;
    }

    let frame_index = unsafe { swap_chain.GetCurrentBackBufferIndex() } as usize;

    // Back buffers plus the offscreen texture.
    let rtv_heap: ID3D12DescriptorHeap = unsafe {
        device.CreateDescriptorHeap(&D3D12_DESCRIPTOR_HEAP_DESC {
            NumDescriptors: frame_count + 1,
            Type: D3D12_DESCRIPTOR_HEAP_TYPE_RTV,
            Flags: D3D12_DESCRIPTOR_HEAP_FLAG_NONE,
            ..Default::default()
        })
    }?;
    let rtv_descriptor_size =
        unsafe { device.GetDescriptorHandleIncrementSize(D3D12_DESCRIPTOR_HEAP_TYPE_RTV) };

    let srv_heap: ID3D12DescriptorHeap = unsafe {
        device.CreateDescriptorHeap(&D3D12_DESCRIPTOR_HEAP_DESC {
            NumDescriptors: 1,
            Type: D3D12_DESCRIPTOR_HEAP_TYPE_CBV_SRV_UAV,
            Flags: D3D12_DESCRIPTOR_HEAP_FLAG_SHADER_VISIBLE,
            ..Default::default()
        })
    }?;

    let render_targets = (0..frame_count)
        .map(|i| {
            let resource: ID3D12Resource = unsafe { swap_chain.GetBuffer(i)? };
            let rtv = rtv_handle_at(&rtv_heap, rtv_descriptor_size, i as usize);
            unsafe { device.CreateRenderTargetView(&resource, None, rtv) };
            Ok(resource)
        })
        .collect::<Result<Vec<_>>>()?;

    let offscreen_texture = create_offscreen_target(
        device,
        width as u32,
        height as u32,
        rtv_handle_at(&rtv_heap, rtv_descriptor_size, frame_count as usize),
        unsafe { srv_heap.GetCPUDescriptorHandleForHeapStart() },
    )?;

    let command_allocators = (0..frame_count)
        .map(|_| unsafe { device.CreateCommandAllocator(D3D12_COMMAND_LIST_TYPE_DIRECT) })
        .collect::<Result<Vec<ID3D12CommandAllocator>>>()?;

    let viewport = D3D12_VIEWPORT {
        TopLeftX: 0.0,
        TopLeftY: 0.0,
        Width: width as f32,
        Height: height as f32,
        MinDepth: D3D12_MIN_DEPTH,
        MaxDepth: D3D12_MAX_DEPTH,
    };
    let scissor_rect = RECT {
        left: 0,
        top: 0,
        right: width,
        bottom: height,
    };

    let root_signature = create_root_signature(device)?;
    let triangle_pso = create_pipeline_state(device, &root_signature, PipelineKind::Triangle)?;
    let composite_pso = create_pipeline_state(device, &root_signature, PipelineKind::Composite)?;

    let command_list: ID3D12GraphicsCommandList = unsafe {
        device.CreateCommandList(
            0,
            D3D12_COMMAND_LIST_TYPE_DIRECT,
            &command_allocators[frame_index],
            &triangle_pso,
        )
    }?;
    // Command lists are created in the recording state, and the main loop
    // expects it to be closed.
    unsafe { command_list.Close()? };

    let aspect_ratio = width as f32 / height as f32;
    let (screen_vertex_buffer, screen_vbv) = create_vertex_buffer(
        device,
        &triangle(aspect_ratio, SCREEN_COLORS),
        w!("ScreenVertexBuffer"),
    )?;
    let (texture_vertex_buffer, texture_vbv) = create_vertex_buffer(
        device,
        &triangle(aspect_ratio, TEXTURE_COLORS),
        w!("TextureVertexBuffer"),
    )?;

    let timeline = D3d12Timeline::new(device, &command_queue)?;
    let mut frames = FrameRing::new(timeline, command_allocators)?;
    frames.set_index(frame_index)?;

    let mut resources = Resources {
        command_queue,
        swap_chain,
        render_targets,
        rtv_heap,
        rtv_descriptor_size,
        srv_heap,
        viewport,
        scissor_rect,
        frames,
        root_signature,
        triangle_pso,
        composite_pso,
        command_list,
        screen_vertex_buffer,
        screen_vbv,
        texture_vertex_buffer,
        texture_vbv,
        offscreen_texture,
    };

    // Wait for setup to complete before the first frame.
    let fence = resources.frames.wait_idle()?;
    debug!(%fence, frames_in_flight = frame_count, "bound to window");

    sample.resources = Some(resources);
    Ok(())
}
