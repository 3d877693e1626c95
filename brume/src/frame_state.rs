use glam::uvec4;
use log::debug;

use crate::gpu::{
    FroxelGrid, VolumeArgs, VolumeCamera, MAX_FROXEL_VOLUMES,
};
use crate::{VolumePose, VolumeScene, VolumeSettings};

/// Rebuilds [`VolumeArgs`] once per frame, carrying the previous frame's
/// matrices and origins over so the shaders can reproject against them.
#[derive(Debug, Default)]
pub struct FrameState {
    args: VolumeArgs,
    ready: bool,
}

impl FrameState {
    /// Folds this frame's scene input into the args.
    ///
    /// `reset` forces a history drop on top of whatever the scene asks for;
    /// the controller raises it on settings changes. The first frame resets
    /// unconditionally - there is no previous grid to reproject against.
    pub fn update(
        &mut self,
        settings: &VolumeSettings,
        scene: &VolumeScene,
        reset: bool,
    ) {
        let reset = reset || scene.reset_history || !self.ready;

        if reset {
            debug!("Resetting volumetric history");
        }

        if let Some(portal) = scene.teleportation_portal {
            assert!(
                portal > 0 && portal < MAX_FROXEL_VOLUMES,
                "teleportation_portal must name a portal volume in \
                 (0, {MAX_FROXEL_VOLUMES}), got {portal}",
            );
        }

        for volume in 0..(MAX_FROXEL_VOLUMES as usize) {
            let pose = &scene.poses[volume];

            let prev = if self.ready {
                Some(self.args.cameras[volume])
            } else {
                None
            };

            self.args.cameras[volume] = Self::serialize(pose, prev.as_ref());
        }

        self.args.grid = FroxelGrid::new(
            settings.grid_size,
            settings.depth_slices,
            settings.exponent,
            settings.max_distance,
        );

        self.args.d0 = uvec4(
            scene.active_volumes.min(MAX_FROXEL_VOLUMES),
            scene.teleportation_portal.unwrap_or(0),
            reset as u32,
            settings.accumulation_limit,
        );

        self.args.d1 = settings.scattering.extend(settings.anisotropy);
        self.ready = true;
    }

    pub fn args(&self) -> &VolumeArgs {
        &self.args
    }

    fn serialize(
        pose: &VolumePose,
        prev: Option<&VolumeCamera>,
    ) -> VolumeCamera {
        let sign = if pose.invert_view_z { -1.0 } else { 1.0 };

        // First frame: pretend the camera has always been where it is now
        let (prev_view, prev_projection, prev_origin) = match prev {
            Some(prev) => (prev.view, prev.projection, prev.origin()),
            None => (pose.view, pose.projection, pose.origin),
        };

        VolumeCamera {
            view: pose.view,
            projection: pose.projection,
            prev_view,
            prev_projection,
            ndc_to_world: (pose.projection * pose.view).inverse(),
            origin: pose.origin.extend(pose.near_plane),
            prev_origin: prev_origin.extend(sign),
        }
    }
}
