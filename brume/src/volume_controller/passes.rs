mod volume_integrate;
mod volume_preintegrate;

use log::debug;

pub use self::volume_integrate::*;
pub use self::volume_preintegrate::*;
use crate::{Engine, VolumeBuffers};

#[derive(Debug)]
pub struct VolumePasses {
    pub volume_integrate: VolumeIntegratePass,
    pub volume_preintegrate: VolumePreintegratePass,
}

impl VolumePasses {
    pub fn new(
        engine: &Engine,
        device: &wgpu::Device,
        buffers: &VolumeBuffers,
    ) -> Self {
        debug!("Initializing volume passes");

        Self {
            volume_integrate: VolumeIntegratePass::new(
                engine, device, buffers,
            ),
            volume_preintegrate: VolumePreintegratePass::new(
                engine, device, buffers,
            ),
        }
    }
}
