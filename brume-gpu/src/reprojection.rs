use glam::Vec3;

use crate::{VolumeArgs, FROXEL_VOLUME_MAIN};

/// Resolves which volume holds the previous frame's history for given
/// volume.
///
/// With no teleportation the mapping is the identity; when the camera went
/// through a portal this frame, the main volume and the portal volume have
/// swapped spaces, so each reprojects into the other. Any other volume's far
/// side was not involved in the teleport and its history is stale - the
/// second value comes back `false` and the caller must drop history for it.
pub fn prev_volume(volume: u32, teleportation_portal: u32) -> (u32, bool) {
    if teleportation_portal == FROXEL_VOLUME_MAIN {
        (volume, true)
    } else if volume == FROXEL_VOLUME_MAIN {
        (teleportation_portal, true)
    } else if volume == teleportation_portal {
        (FROXEL_VOLUME_MAIN, true)
    } else {
        (volume, false)
    }
}

/// Where a current-frame froxel maps to in the previous frame's grid.
///
/// Produced fresh per query; nothing here survives past the cell invocation
/// that asked for it.
#[derive(Clone, Copy, Default)]
pub struct VolumeLookup {
    pub uvw: Vec3,
    pub world_pos: Vec3,
    pub coordinate: Vec3,
    pub volume: u32,
    pub exists: u32,
    pub valid: u32,
}

impl VolumeLookup {
    pub fn resolve(
        args: &VolumeArgs,
        world_pos: Vec3,
        volume: u32,
    ) -> Self {
        let (volume_then, exists) =
            prev_volume(volume, args.teleportation_portal());

        let camera = args.camera(volume);
        let prev_camera = args.camera(volume_then);

        // Each volume's camera can sit at a different translated-world
        // origin; re-express the position relative to where the previous
        // camera had its origin last frame
        let world_pos =
            world_pos + (camera.origin() - prev_camera.prev_origin());

        // Note that this reconstructs the previous frame's mapping with the
        // *current* frame's grid parameters; that's exact only while those
        // parameters are unchanged, which the host guarantees by raising
        // `reset_history` whenever they do change
        let uvw = args.grid.world_to_prev_uvw(prev_camera, world_pos);

        let valid = uvw.x > 0.0
            && uvw.x < 1.0
            && uvw.y > 0.0
            && uvw.y < 1.0
            && uvw.z > 0.0
            && uvw.z < 1.0
            && !args.reset_history();

        Self {
            uvw,
            world_pos,
            coordinate: args.grid.uvw_to_coordinate(uvw),
            volume: volume_then,
            exists: exists as u32,
            valid: valid as u32,
        }
    }

    /// Returns whether history may be sampled through this lookup.
    pub fn is_some(&self) -> bool {
        self.exists != 0 && self.valid != 0
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{uvec2, uvec3, uvec4, vec4, Mat4, Vec3, Vec3Swizzles};

    use super::*;
    use crate::{
        index_to_coordinate, FroxelGrid, VolumeCamera, MAX_FROXEL_VOLUMES,
    };

    fn camera() -> VolumeCamera {
        let view = Mat4::IDENTITY;
        let projection = Mat4::perspective_rh(1.2, 1.0, 0.1, 100.0);

        VolumeCamera {
            view,
            projection,
            prev_view: view,
            prev_projection: projection,
            ndc_to_world: (projection * view).inverse(),
            origin: Vec3::ZERO.extend(0.1),
            prev_origin: Vec3::ZERO.extend(-1.0),
        }
    }

    fn args() -> VolumeArgs {
        VolumeArgs {
            grid: FroxelGrid::new(uvec2(4, 4), 4, 2.0, 50.0),
            cameras: [camera(); MAX_FROXEL_VOLUMES as usize],
            d0: uvec4(1, 0, 0, 32),
            d1: vec4(0.01, 0.01, 0.01, 0.0),
        }
    }

    #[test]
    fn prev_volume_without_teleportation() {
        for volume in 0..MAX_FROXEL_VOLUMES {
            assert_eq!((volume, true), prev_volume(volume, 0));
        }
    }

    #[test]
    fn prev_volume_with_teleportation() {
        // The camera teleported through portal 2: main and the portal have
        // swapped spaces, while portal 1's far side went stale
        assert_eq!((2, true), prev_volume(0, 2));
        assert_eq!((0, true), prev_volume(2, 2));
        assert_eq!((1, false), prev_volume(1, 2));
    }

    #[test]
    fn reset_history_invalidates_everything() {
        let mut args = args();

        args.d0.z = 1;

        let coordinate = index_to_coordinate(uvec3(2, 2, 2));
        let world = args.grid.coordinate_to_world(args.camera(0), coordinate);
        let lookup = VolumeLookup::resolve(&args, world, 0);

        assert_eq!(1, lookup.exists);
        assert_eq!(0, lookup.valid);
        assert!(lookup.is_none());
    }

    #[test]
    fn static_camera_reprojects_onto_itself() {
        let args = args();

        for z in 0..4 {
            for y in 0..4 {
                for x in 0..4 {
                    let coordinate = index_to_coordinate(uvec3(x, y, z));

                    let world = args
                        .grid
                        .coordinate_to_world(args.camera(0), coordinate);

                    let lookup = VolumeLookup::resolve(&args, world, 0);

                    assert!(lookup.is_some(), "invalid at {x},{y},{z}");
                    assert_eq!(0, lookup.volume);

                    assert_relative_eq!(
                        coordinate.x,
                        lookup.coordinate.x,
                        max_relative = 1e-3,
                        epsilon = 1e-3
                    );

                    assert_relative_eq!(
                        coordinate.y,
                        lookup.coordinate.y,
                        max_relative = 1e-3,
                        epsilon = 1e-3
                    );

                    assert_relative_eq!(
                        coordinate.z,
                        lookup.coordinate.z,
                        max_relative = 1e-3,
                        epsilon = 1e-3
                    );
                }
            }
        }
    }

    #[test]
    fn origin_continuity_correction() {
        let mut args = args();

        // The portal camera's origin moved between frames; the corrected
        // position must absorb the difference
        args.cameras[0].origin = Vec3::new(10.0, 0.0, 0.0).extend(0.1);
        args.cameras[2].prev_origin =
            Vec3::new(4.0, 0.0, 0.0).extend(-1.0);
        args.d0.y = 2;

        let world = Vec3::new(0.0, 0.0, -5.0);
        let lookup = VolumeLookup::resolve(&args, world, 0);

        assert_eq!(2, lookup.volume);
        assert_eq!(
            world + Vec3::new(6.0, 0.0, 0.0),
            lookup.world_pos
        );
    }

    #[test]
    fn out_of_frustum_is_invalid() {
        let args = args();

        // Way off to the side of the frustum
        let lookup =
            VolumeLookup::resolve(&args, Vec3::new(500.0, 0.0, -5.0), 0);

        assert_eq!(0, lookup.valid);
        assert!(lookup.uvw.xy().cmplt(glam::Vec2::ZERO).any()
            || lookup.uvw.xy().cmpgt(glam::Vec2::ONE).any());
    }
}
