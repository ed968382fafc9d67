use windows::core::*;
use windows::Win32::Foundation::E_POINTER;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::Common::*;

use super::create_pipeline_state::RENDER_TARGET_FORMAT;
use crate::scene::TEXTURE_CLEAR_COLOR;

/// Creates the window-sized texture the second triangle is drawn into, with
/// an RTV at `rtv_handle` and an SRV at `srv_handle`.
///
/// The texture starts in `PIXEL_SHADER_RESOURCE`, the state every frame
/// leaves it in.
pub fn create_offscreen_target(
    device: &ID3D12Device,
    width: u32,
    height: u32,
    rtv_handle: D3D12_CPU_DESCRIPTOR_HANDLE,
    srv_handle: D3D12_CPU_DESCRIPTOR_HANDLE,
) -> Result<ID3D12Resource> {
    let heap_props = D3D12_HEAP_PROPERTIES {
        Type: D3D12_HEAP_TYPE_DEFAULT,
        ..Default::default()
    };

    let resource_desc = D3D12_RESOURCE_DESC {
        Dimension: D3D12_RESOURCE_DIMENSION_TEXTURE2D,
        Alignment: 0,
        Width: width as u64,
        Height: height,
        DepthOrArraySize: 1,
        MipLevels: 1,
        Format: RENDER_TARGET_FORMAT,
        SampleDesc: DXGI_SAMPLE_DESC {
            Count: 1,
            Quality: 0,
        },
        Layout: D3D12_TEXTURE_LAYOUT_UNKNOWN,
        Flags: D3D12_RESOURCE_FLAG_ALLOW_RENDER_TARGET,
    };

    let clear_value = D3D12_CLEAR_VALUE {
        Format: RENDER_TARGET_FORMAT,
        Anonymous: D3D12_CLEAR_VALUE_0 {
            Color: TEXTURE_CLEAR_COLOR,
        },
    };

    let mut texture: Option<ID3D12Resource> = None;
    unsafe {
        device.CreateCommittedResource(
            &heap_props,
            D3D12_HEAP_FLAG_NONE,
            &resource_desc,
            D3D12_RESOURCE_STATE_PIXEL_SHADER_RESOURCE,
            Some(&clear_value),
            &mut texture,
        )?
    };
    let texture = texture
        .ok_or_else(|| Error::new(E_POINTER, "CreateCommittedResource returned no texture"))?;
    unsafe { texture.SetName(w!("OffscreenTexture")) }.ok();

    unsafe {
        device.CreateRenderTargetView(&texture, None, rtv_handle);
        device.CreateShaderResourceView(&texture, None, srv_handle);
    }

    Ok(texture)
}
