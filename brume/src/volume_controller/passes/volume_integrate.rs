use glam::uvec3;

use crate::{
    gpu, Engine, VolumeBuffers, VolumeComputePass, VolumeController,
};

#[derive(Debug)]
pub struct VolumeIntegratePass {
    pass: VolumeComputePass<gpu::VolumeIntegratePassParams>,
}

impl VolumeIntegratePass {
    pub fn new(
        engine: &Engine,
        device: &wgpu::Device,
        buffers: &VolumeBuffers,
    ) -> Self {
        let pass = VolumeComputePass::builder("volume_integrate")
            .bind([&engine.lights.bind_readable()])
            .bind([
                &buffers.args.bind_readable(),
                &buffers.grid.past().bind_readable(),
                &buffers.grid.curr().bind_writable(),
                &buffers.inspection.bind_writable(),
            ])
            .build(device, &engine.shaders.volume_integrate);

        Self { pass }
    }

    pub fn run(
        &self,
        volume: &VolumeController,
        encoder: &mut wgpu::CommandEncoder,
        seed: u32,
    ) {
        // This pass uses 8x8 warps, one invocation per cell of the packed
        // grid:
        let size = volume.physical_size();
        let size = uvec3((size.x + 7) / 8, (size.y + 7) / 8, size.z);

        let params = gpu::VolumeIntegratePassParams {
            seed,
            frame: volume.frame(),
            inspection: volume.inspection().serialize(),
        };

        self.pass.run(volume, encoder, size, params);
    }
}
