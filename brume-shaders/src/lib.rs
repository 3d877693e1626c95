#![cfg_attr(target_arch = "spirv", no_std)]

pub mod volume_integrate;
pub mod volume_preintegrate;
