use glam::{Mat4, Vec3};

use crate::gpu::MAX_FROXEL_VOLUMES;

/// Per-frame camera pose of a single volume, handed in by the embedding
/// renderer.
///
/// `view` and `projection` must be the non-jittered matrices - reprojection
/// against jittered history chases the jitter pattern instead of converging.
#[derive(Clone, Copy, Debug)]
pub struct VolumePose {
    pub view: Mat4,
    pub projection: Mat4,

    /// Offset of this volume's translated-world origin from the absolute
    /// world origin.
    pub origin: Vec3,

    pub near_plane: f32,

    /// Whether view-space z grows towards the camera (right-handed cameras).
    pub invert_view_z: bool,
}

impl Default for VolumePose {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            origin: Vec3::ZERO,
            near_plane: 0.1,
            invert_view_z: true,
        }
    }
}

/// Per-frame scene input of the volumetric pass.
#[derive(Clone, Debug, Default)]
pub struct VolumeScene {
    /// Fixed-capacity registry of poses; only the first `active_volumes`
    /// entries are read.
    pub poses: [VolumePose; MAX_FROXEL_VOLUMES as usize],

    pub active_volumes: u32,

    /// Set for exactly the frame on which the camera went through a portal;
    /// names the portal volume's index (never the main volume).
    pub teleportation_portal: Option<u32>,

    /// Forces all temporal history to be dropped this frame, e.g. on a scene
    /// cut.
    pub reset_history: bool,
}
