use tracing::error;
use windows::core::*;
use windows::Win32::Foundation::E_FAIL;
use windows::Win32::Graphics::Direct3D::*;
use windows::Win32::Graphics::Direct3D12::*;

use super::compile_shader::blob_bytes;
use crate::scene::RootConstants;

pub const ROOT_CONSTANTS_PARAMETER: u32 = 0;
pub const OFFSCREEN_SRV_PARAMETER: u32 = 1;

/// One root signature for both pipelines:
/// `b0` root constants, a one-entry SRV table at `t0` and a static linear
/// clamp sampler at `s0`.
pub fn create_root_signature(device: &ID3D12Device) -> Result<ID3D12RootSignature> {
    let srv_ranges = [D3D12_DESCRIPTOR_RANGE {
        RangeType: D3D12_DESCRIPTOR_RANGE_TYPE_SRV,
        NumDescriptors: 1,
        BaseShaderRegister: 0,
        RegisterSpace: 0,
        OffsetInDescriptorsFromTableStart: 0,
    }];

    let mut constants = D3D12_ROOT_PARAMETER::default();
    constants.ParameterType = D3D12_ROOT_PARAMETER_TYPE_32BIT_CONSTANTS;
    constants.Anonymous.Constants = D3D12_ROOT_CONSTANTS {
        ShaderRegister: 0,
        RegisterSpace: 0,
        Num32BitValues: RootConstants::COUNT,
    };
    constants.ShaderVisibility = D3D12_SHADER_VISIBILITY_ALL;

    let mut srv_table = D3D12_ROOT_PARAMETER::default();
    srv_table.ParameterType = D3D12_ROOT_PARAMETER_TYPE_DESCRIPTOR_TABLE;
    srv_table.Anonymous.DescriptorTable = D3D12_ROOT_DESCRIPTOR_TABLE {
        NumDescriptorRanges: srv_ranges.len() as u32,
        pDescriptorRanges: srv_ranges.as_ptr(),
    };
    srv_table.ShaderVisibility = D3D12_SHADER_VISIBILITY_PIXEL;

    let parameters = [constants, srv_table];

    let sampler = D3D12_STATIC_SAMPLER_DESC {
        Filter: D3D12_FILTER_MIN_MAG_MIP_LINEAR,
        AddressU: D3D12_TEXTURE_ADDRESS_MODE_CLAMP,
        AddressV: D3D12_TEXTURE_ADDRESS_MODE_CLAMP,
        AddressW: D3D12_TEXTURE_ADDRESS_MODE_CLAMP,
        MipLODBias: 0.0,
        MaxAnisotropy: 0,
        ComparisonFunc: D3D12_COMPARISON_FUNC_NEVER,
        BorderColor: D3D12_STATIC_BORDER_COLOR_TRANSPARENT_BLACK,
        MinLOD: 0.0,
        MaxLOD: D3D12_FLOAT32_MAX,
        ShaderRegister: 0,
        RegisterSpace: 0,
        ShaderVisibility: D3D12_SHADER_VISIBILITY_PIXEL,
    };

    let desc = D3D12_ROOT_SIGNATURE_DESC {
        NumParameters: parameters.len() as u32,
        pParameters: parameters.as_ptr(),
        NumStaticSamplers: 1,
        pStaticSamplers: &sampler,
        Flags: D3D12_ROOT_SIGNATURE_FLAG_ALLOW_INPUT_ASSEMBLER_INPUT_LAYOUT,
    };

    let mut signature_blob = None;
    let mut error_blob = None;

    let serialize_result = unsafe {
        D3D12SerializeRootSignature(
            &desc,
            D3D_ROOT_SIGNATURE_VERSION_1,
            &mut signature_blob,
            Some(&mut error_blob),
        )
    };

    if let Err(e) = serialize_result {
        if let Some(errors) = error_blob {
            error!(
                "Root Signature Serialization Error: {}",
                String::from_utf8_lossy(blob_bytes(&errors))
            );
        }
        return Err(e);
    }

    let signature_blob: ID3DBlob = signature_blob
        .ok_or_else(|| Error::new(E_FAIL, "D3D12SerializeRootSignature returned no blob"))?;

    unsafe { device.CreateRootSignature(0, blob_bytes(&signature_blob)) }
}
