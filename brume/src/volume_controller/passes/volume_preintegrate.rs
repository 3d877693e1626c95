use glam::uvec3;

use crate::gpu::MAX_FROXEL_VOLUMES;
use crate::{Engine, VolumeBuffers, VolumeComputePass, VolumeController};

#[derive(Debug)]
pub struct VolumePreintegratePass {
    pass: VolumeComputePass,
}

impl VolumePreintegratePass {
    pub fn new(
        engine: &Engine,
        device: &wgpu::Device,
        buffers: &VolumeBuffers,
    ) -> Self {
        let pass = VolumeComputePass::builder("volume_preintegrate")
            .bind([
                &buffers.args.bind_readable(),
                &buffers.grid.curr().bind_readable(),
                &buffers.preintegrated.bind_writable(),
            ])
            .build(device, &engine.shaders.volume_preintegrate);

        Self { pass }
    }

    pub fn run(
        &self,
        volume: &VolumeController,
        encoder: &mut wgpu::CommandEncoder,
    ) {
        // This pass uses 8x8 warps, one invocation per froxel column, one
        // workgroup layer per volume:
        let size = volume.settings().grid_size;

        let size =
            uvec3((size.x + 7) / 8, (size.y + 7) / 8, MAX_FROXEL_VOLUMES);

        self.pass.run(volume, encoder, size, ());
    }
}
