use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct VolumeIntegratePassParams {
    pub seed: u32,
    pub frame: u32,
    pub inspection: u32,
}
