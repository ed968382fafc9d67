use tracing::debug;
use tracing::info;
use windows::core::*;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::D3D12CreateDevice;
use windows::Win32::Graphics::Direct3D12::ID3D12Device;
use windows::Win32::Graphics::Dxgi::*;

/// Returns the first hardware adapter that supports Direct3D 12 at feature
/// level 11.0, skipping software adapters.
pub fn get_hardware_adapter(factory: &IDXGIFactory4) -> Result<IDXGIAdapter1> {
    for i in 0.. {
        let adapter = match unsafe { factory.EnumAdapters1(i) } {
            Ok(a) => a,
            Err(e) if e.code() == DXGI_ERROR_NOT_FOUND => break,
            Err(e) => return Err(e),
        };

        let desc = unsafe { adapter.GetDesc1()? };
        let name_len = desc
            .Description
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(desc.Description.len());
        let adapter_name = String::from_utf16_lossy(&desc.Description[..name_len]);

        if (DXGI_ADAPTER_FLAG(desc.Flags as i32) & DXGI_ADAPTER_FLAG_SOFTWARE)
            != DXGI_ADAPTER_FLAG_NONE
        {
            debug!(index = i, adapter = %adapter_name, "skipping software adapter");
            continue;
        }

        // A null output pointer only checks for support.
        if unsafe {
            D3D12CreateDevice(
                &adapter,
                D3D_FEATURE_LEVEL_11_0,
                std::ptr::null_mut::<Option<ID3D12Device>>(),
            )
        }
        .is_ok()
        {
            info!(index = i, adapter = %adapter_name, "selected adapter");
            return Ok(adapter);
        }
        debug!(index = i, adapter = %adapter_name, "adapter lacks feature level 11.0");
    }

    Err(Error::new(
        DXGI_ERROR_NOT_FOUND,
        "No suitable D3D12 hardware adapter found.",
    ))
}
