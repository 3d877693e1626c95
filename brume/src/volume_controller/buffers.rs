use std::mem;

use glam::Vec4;
use log::debug;

use crate::gpu::{self, MAX_FROXEL_VOLUMES};
use crate::{
    DoubleBuffered, MappedUniformBuffer, UnmappedStorageBuffer, VolumeSettings,
};

#[derive(Debug)]
pub struct VolumeBuffers {
    pub args: MappedUniformBuffer<gpu::VolumeArgs>,

    /// Froxel grid cells, `Vec4(rgb radiance, w history age)`; one half is
    /// written this frame while the other serves as read-only history.
    pub grid: DoubleBuffered<UnmappedStorageBuffer>,

    /// Per-cell preintegrated `Vec4(rgb radiance, w transmittance)`.
    pub preintegrated: UnmappedStorageBuffer,

    pub inspection: UnmappedStorageBuffer,
}

impl VolumeBuffers {
    pub fn new(device: &wgpu::Device, settings: &VolumeSettings) -> Self {
        debug!("Initializing volume buffers");

        let cells = (settings.grid_size.x * MAX_FROXEL_VOLUMES) as usize
            * settings.grid_size.y as usize
            * settings.depth_slices as usize;

        let cells_size = cells * mem::size_of::<Vec4>();

        let args =
            MappedUniformBuffer::new_default(device, "brume_volume_args");

        let grid =
            DoubleBuffered::new(device, "brume_volume_grid", cells_size);

        let preintegrated = UnmappedStorageBuffer::new(
            device,
            "brume_volume_preintegrated",
            cells_size,
        );

        let inspection = UnmappedStorageBuffer::new(
            device,
            "brume_volume_inspection",
            cells_size,
        );

        Self {
            args,
            grid,
            preintegrated,
            inspection,
        }
    }
}
