use tracing::info;
use tracing::warn;
use windows::core::*;
use windows::Win32::Foundation::E_POINTER;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;
use windows::Win32::Graphics::Dxgi::*;

use crate::adapter_utils::get_hardware_adapter;
use crate::command_line::SampleCommandLine;

/// Creates the DXGI factory and the device. Debug builds also enable the
/// debug layer and hand back the DXGI info queue when it is available.
pub fn create_device(
    command_line: &SampleCommandLine,
) -> Result<(IDXGIFactory4, ID3D12Device, Option<IDXGIInfoQueue>)> {
    let mut debug_flags = DXGI_CREATE_FACTORY_FLAGS(0);
    let mut info_queue: Option<IDXGIInfoQueue> = None;

    if cfg!(debug_assertions) && enable_debug_layer() {
        debug_flags |= DXGI_CREATE_FACTORY_DEBUG;
        match unsafe { DXGIGetDebugInterface1::<IDXGIInfoQueue>(0) } {
            Ok(queue) => {
                info!("DXGI Info Queue obtained.");
                info_queue = Some(queue);
            }
            Err(e) => warn!("Failed to get DXGI Info Queue: {e}"),
        }
    }

    let dxgi_factory: IDXGIFactory4 = unsafe { CreateDXGIFactory2(debug_flags) }?;

    let adapter: IDXGIAdapter1 = if command_line.use_warp_device {
        info!("Using WARP adapter.");
        unsafe { dxgi_factory.EnumWarpAdapter()? }
    } else {
        get_hardware_adapter(&dxgi_factory)?
    };

    let mut device: Option<ID3D12Device> = None;
    unsafe { D3D12CreateDevice(&adapter, D3D_FEATURE_LEVEL_11_0, &mut device) }?;
    let device = device.ok_or_else(|| Error::new(E_POINTER, "D3D12CreateDevice returned no device"))?;

    Ok((dxgi_factory, device, info_queue))
}

fn enable_debug_layer() -> bool {
    unsafe {
        let mut debug1: Option<ID3D12Debug1> = None;
        if D3D12GetDebugInterface(&mut debug1).is_ok() {
            if let Some(debug1) = debug1 {
                debug1.EnableDebugLayer();
                debug1.SetEnableGPUBasedValidation(true);
                info!("D3D12 Debug Layer Enabled (ID3D12Debug1 + GBV)");
                return true;
            }
        }

        let mut debug: Option<ID3D12Debug> = None;
        if D3D12GetDebugInterface(&mut debug).is_ok() {
            if let Some(debug) = debug {
                debug.EnableDebugLayer();
                info!("D3D12 Debug Layer Enabled (ID3D12Debug)");
                return true;
            }
        }
    }
    warn!("D3D12 Debug Layer unavailable.");
    false
}
