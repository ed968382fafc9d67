use tracing::error;
use windows::core::*;
use windows::Win32::Foundation::E_FAIL;
use windows::Win32::Graphics::Direct3D::Fxc::*;
use windows::Win32::Graphics::Direct3D::*;

const SHADERS_HLSL: &str = include_str!("../shaders.hlsl");

/// Compiles one entry point of the embedded `shaders.hlsl`.
pub fn compile_shader(entry_point: PCSTR, target: PCSTR) -> Result<ID3DBlob> {
    let flags = if cfg!(debug_assertions) {
        D3DCOMPILE_DEBUG | D3DCOMPILE_SKIP_OPTIMIZATION
    } else {
        0
    };

    let mut shader_blob = None;
    let mut error_blob = None;
    let result = unsafe {
        D3DCompile(
            SHADERS_HLSL.as_ptr() as _,
            SHADERS_HLSL.len(),
            s!("shaders.hlsl"),
            None,
            None,
            entry_point,
            target,
            flags,
            0,
            &mut shader_blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = result {
        if let Some(errors) = error_blob {
            let message = String::from_utf8_lossy(blob_bytes(&errors));
            let entry_point = unsafe { String::from_utf8_lossy(entry_point.as_bytes()) };
            let target = unsafe { String::from_utf8_lossy(target.as_bytes()) };
            error!("Shader Compile Error ({entry_point} {target}): {message}");
        }
        return Err(e);
    }

    shader_blob.ok_or_else(|| Error::new(E_FAIL, "D3DCompile returned no bytecode"))
}

pub fn blob_bytes(blob: &ID3DBlob) -> &[u8] {
    unsafe { std::slice::from_raw_parts(blob.GetBufferPointer() as *const u8, blob.GetBufferSize()) }
}
