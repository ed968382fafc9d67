use windows::core::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;

use super::create_root_signature::OFFSCREEN_SRV_PARAMETER;
use super::create_root_signature::ROOT_CONSTANTS_PARAMETER;
use super::resources::Resources;
use super::transition_barrier::transition_barrier;
use crate::scene::RootConstants;
use crate::scene::Scene;
use crate::scene::SCREEN_CLEAR_COLOR;
use crate::scene::TEXTURE_CLEAR_COLOR;

/// Records one frame into `command_allocator`:
///
/// 1. the second triangle into the offscreen texture,
/// 2. the first triangle onto the back buffer,
/// 3. the circle that samples the offscreen texture.
pub fn populate_command_list(
    resources: &Resources,
    command_allocator: &ID3D12CommandAllocator,
    scene: &Scene,
) -> Result<()> {
    // Only safe because the frame ring confirmed the GPU is done with this allocator.
    unsafe { command_allocator.Reset()? };

    let command_list = &resources.command_list;
    unsafe { command_list.Reset(command_allocator, &resources.triangle_pso)? };

    unsafe {
        command_list.SetGraphicsRootSignature(&resources.root_signature);
        command_list.SetDescriptorHeaps(&[Some(resources.srv_heap.clone())]);
        command_list.RSSetViewports(&[resources.viewport]);
        command_list.RSSetScissorRects(&[resources.scissor_rect]);
        command_list.IASetPrimitiveTopology(D3D_PRIMITIVE_TOPOLOGY_TRIANGLELIST);
    }

    // Pass 1: offscreen texture.
    let offscreen_rtv = resources.offscreen_rtv();
    unsafe {
        command_list.ResourceBarrier(&[transition_barrier(
            &resources.offscreen_texture,
            D3D12_RESOURCE_STATE_PIXEL_SHADER_RESOURCE,
            D3D12_RESOURCE_STATE_RENDER_TARGET,
        )]);
        command_list.OMSetRenderTargets(1, Some(&offscreen_rtv), false, None);
        command_list.ClearRenderTargetView(offscreen_rtv, &TEXTURE_CLEAR_COLOR, None);
        set_root_constants(command_list, &scene.texture_constants());
        command_list.IASetVertexBuffers(0, Some(&[resources.texture_vbv]));
        command_list.DrawInstanced(3, 1, 0, 0);
        command_list.ResourceBarrier(&[transition_barrier(
            &resources.offscreen_texture,
            D3D12_RESOURCE_STATE_RENDER_TARGET,
            D3D12_RESOURCE_STATE_PIXEL_SHADER_RESOURCE,
        )]);
    }

    // Pass 2: back buffer.
    let back_buffer_rtv = resources.back_buffer_rtv();
    unsafe {
        command_list.ResourceBarrier(&[transition_barrier(
            resources.back_buffer(),
            D3D12_RESOURCE_STATE_PRESENT,
            D3D12_RESOURCE_STATE_RENDER_TARGET,
        )]);
        command_list.OMSetRenderTargets(1, Some(&back_buffer_rtv), false, None);
        command_list.ClearRenderTargetView(back_buffer_rtv, &SCREEN_CLEAR_COLOR, None);
        set_root_constants(command_list, &scene.screen_constants());
        command_list.IASetVertexBuffers(0, Some(&[resources.screen_vbv]));
        command_list.DrawInstanced(3, 1, 0, 0);

        command_list.SetPipelineState(&resources.composite_pso);
        set_root_constants(
            command_list,
            &RootConstants::composite(&scene.shape, resources.viewport_size()),
        );
        command_list.SetGraphicsRootDescriptorTable(
            OFFSCREEN_SRV_PARAMETER,
            resources.srv_heap.GetGPUDescriptorHandleForHeapStart(),
        );
        command_list.DrawInstanced(3, 1, 0, 0);

        command_list.ResourceBarrier(&[transition_barrier(
            resources.back_buffer(),
            D3D12_RESOURCE_STATE_RENDER_TARGET,
            D3D12_RESOURCE_STATE_PRESENT,
        )]);
    }

    unsafe { command_list.Close() }
}

fn set_root_constants(command_list: &ID3D12GraphicsCommandList, constants: &RootConstants) {
    unsafe {
        command_list.SetGraphicsRoot32BitConstants(
            ROOT_CONSTANTS_PARAMETER,
            RootConstants::COUNT,
            bytemuck::bytes_of(constants).as_ptr() as _,
            0,
        )
    };
}
