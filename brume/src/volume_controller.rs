mod buffers;
mod pass;
mod passes;

use glam::uvec3;
use log::{debug, info};
use rand::Rng;

pub use self::buffers::*;
pub use self::pass::*;
pub use self::passes::*;
use crate::{gpu, Engine, FrameState, VolumeScene, VolumeSettings};

/// Diagnostic output of the volumetric passes; see
/// [`VolumeController::set_inspection()`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InspectionChannel {
    #[default]
    None,
    PrevUvw,
    ReprojectionValidity,
    ViewDistance,
    HistoryAge,
}

impl InspectionChannel {
    pub(crate) fn serialize(self) -> u32 {
        match self {
            Self::None => gpu::INSPECT_NONE,
            Self::PrevUvw => gpu::INSPECT_PREV_UVW,
            Self::ReprojectionValidity => gpu::INSPECT_REPROJECTION_VALIDITY,
            Self::ViewDistance => gpu::INSPECT_VIEW_DISTANCE,
            Self::HistoryAge => gpu::INSPECT_HISTORY_AGE,
        }
    }
}

/// Owns one froxel-grid pipeline: settings, per-frame state, the
/// double-buffered grid storage and the compute passes.
///
/// Intended flow, once per frame:
///
/// 1. [`Self::update()`] with this frame's scene,
/// 2. [`Self::flush()`] to push dirty uniforms,
/// 3. [`Self::integrate()`] into a command encoder.
#[derive(Debug)]
pub struct VolumeController {
    settings: VolumeSettings,
    state: FrameState,
    buffers: VolumeBuffers,
    passes: VolumePasses,
    inspection: InspectionChannel,
    reset_pending: bool,
    frame: u32,
}

impl VolumeController {
    pub(crate) fn new(
        engine: &Engine,
        device: &wgpu::Device,
        settings: VolumeSettings,
    ) -> Self {
        settings.validate();

        info!("Creating volume: {}", settings.describe());

        let buffers = VolumeBuffers::new(device, &settings);
        let passes = VolumePasses::new(engine, device, &buffers);

        debug!("Volume created");

        Self {
            settings,
            state: Default::default(),
            buffers,
            passes,
            inspection: Default::default(),
            reset_pending: false,
            frame: 0,
        }
    }

    /// Replaces the settings, reallocating the grid when its shape changed.
    ///
    /// Any reallocation or parameter change drops the temporal history - the
    /// previous grid's cells no longer mean the same thing.
    pub fn set_settings(
        &mut self,
        engine: &Engine,
        device: &wgpu::Device,
        settings: VolumeSettings,
    ) {
        settings.validate();

        if settings == self.settings {
            return;
        }

        let needs_rebuilding = settings.grid_size != self.settings.grid_size
            || settings.depth_slices != self.settings.depth_slices;

        self.settings = settings;
        self.reset_pending = true;

        if needs_rebuilding {
            debug!(
                "Rebuilding buffers for volume: {}",
                self.settings.describe()
            );

            self.buffers = VolumeBuffers::new(device, &self.settings);
            self.passes = VolumePasses::new(engine, device, &self.buffers);
        }
    }

    pub fn set_inspection(&mut self, channel: InspectionChannel) {
        self.inspection = channel;
    }

    /// Requests a history drop for the next frame, e.g. on a scene cut.
    pub fn reset_history(&mut self) {
        self.reset_pending = true;
    }

    pub fn update(&mut self, scene: &VolumeScene) {
        let reset = std::mem::take(&mut self.reset_pending);

        self.state.update(&self.settings, scene, reset);
        *self.buffers.args = *self.state.args();
    }

    pub fn flush(&mut self, queue: &wgpu::Queue) {
        self.frame += 1;
        self.buffers.args.flush(queue);
    }

    pub fn integrate(&self, encoder: &mut wgpu::CommandEncoder) {
        let seed = rand::thread_rng().gen();

        self.passes.volume_integrate.run(self, encoder, seed);
        self.passes.volume_preintegrate.run(self, encoder);
    }

    pub(crate) fn is_alternate(&self) -> bool {
        self.frame % 2 == 1
    }

    pub(crate) fn frame(&self) -> u32 {
        self.frame
    }

    pub(crate) fn inspection(&self) -> InspectionChannel {
        self.inspection
    }

    pub fn settings(&self) -> &VolumeSettings {
        &self.settings
    }

    /// Size of the physical grid: all volumes packed along the x axis.
    pub(crate) fn physical_size(&self) -> glam::UVec3 {
        uvec3(
            self.settings.grid_size.x * gpu::MAX_FROXEL_VOLUMES,
            self.settings.grid_size.y,
            self.settings.depth_slices,
        )
    }
}

impl Drop for VolumeController {
    fn drop(&mut self) {
        info!("Deleting volume: {}", self.settings.describe());
    }
}
