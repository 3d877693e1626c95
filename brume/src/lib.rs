//! Brume is a froxel-based volumetric lighting system: a camera-frustum
//! aligned 3D grid of in-scattering samples, integrated once per cell per
//! frame and temporally reprojected against the previous frame's grid, with
//! support for multiple simultaneous volumes (main world + portal spaces)
//! whose histories swap when the camera teleports through a portal.
//!
//! This crate is the wgpu host side - buffers, per-frame state and pass
//! dispatch; the math and the data structures live in `brume-gpu`, and the
//! compute entry points in `brume-shaders`.
//!
//! Note that the device must be created with
//! `wgpu::Features::PUSH_CONSTANTS`.

mod buffers;
mod frame_state;
mod scene;
mod settings;
mod shaders;
mod volume_controller;

use std::path::Path;

use log::info;

pub use brume_gpu as gpu;
pub(crate) use self::buffers::*;
pub use self::frame_state::*;
pub use self::scene::*;
pub use self::settings::*;
pub use self::shaders::*;
pub use self::volume_controller::*;

/// Maximum number of lights the scattering pass can consume.
pub const MAX_LIGHTS: usize = 1024;

pub struct Engine {
    shaders: Shaders,
    lights: MappedStorageBuffer<gpu::Light>,
}

impl Engine {
    /// Creates the engine, loading the `.spv` modules compiled by
    /// `brume-shader-builder` from `shaders_dir`.
    pub fn new(device: &wgpu::Device, shaders_dir: &Path) -> Self {
        info!("Initializing");

        Self {
            shaders: Shaders::new(device, shaders_dir),
            lights: MappedStorageBuffer::new(device, "brume_lights", MAX_LIGHTS),
        }
    }

    pub fn write_lights(&mut self, lights: &[gpu::Light]) {
        assert!(
            lights.len() <= MAX_LIGHTS,
            "too many lights: got {}, the buffer fits {}",
            lights.len(),
            MAX_LIGHTS,
        );

        *self.lights = lights.to_vec();
    }

    pub fn flush(&mut self, queue: &wgpu::Queue) {
        self.lights.flush(queue);
    }

    pub fn create_volume(
        &self,
        device: &wgpu::Device,
        settings: VolumeSettings,
    ) -> VolumeController {
        VolumeController::new(self, device, settings)
    }
}
