use bytemuck::{Pod, Zeroable};
use glam::{Mat4, UVec4, Vec3, Vec4, Vec4Swizzles};
use spirv_std::arch::IndexUnchecked;

use crate::{FroxelGrid, MAX_FROXEL_VOLUMES};

/// Per-volume camera parameters.
///
/// All positions live in the volume's translated-world space, i.e. relative
/// to the camera; `origin` is that space's offset from the absolute world and
/// only matters when hopping between volumes (see
/// [`crate::VolumeLookup::resolve()`]).
///
/// The previous-frame matrices are the non-jittered ones - reprojection must
/// not chase the jitter pattern.
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct VolumeCamera {
    pub view: Mat4,
    pub projection: Mat4,
    pub prev_view: Mat4,
    pub prev_projection: Mat4,
    pub ndc_to_world: Mat4,

    /// x,y,z - translated-world origin offset
    /// w - near plane distance
    pub origin: Vec4,

    /// x,y,z - previous-frame translated-world origin offset
    /// w - view-space z sign (-1.0 for right-handed cameras)
    pub prev_origin: Vec4,
}

impl VolumeCamera {
    pub fn origin(&self) -> Vec3 {
        self.origin.xyz()
    }

    pub fn near_plane(&self) -> f32 {
        self.origin.w
    }

    pub fn prev_origin(&self) -> Vec3 {
        self.prev_origin.xyz()
    }

    pub fn view_z_sign(&self) -> f32 {
        self.prev_origin.w
    }
}

/// Per-frame state of the volumetric pass; rebuilt by the host every frame
/// and read-only while the passes run.
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct VolumeArgs {
    pub grid: FroxelGrid,

    /// Fixed-capacity registry - always [`MAX_FROXEL_VOLUMES`] entries, of
    /// which the first `active_volumes()` are live.
    pub cameras: [VolumeCamera; MAX_FROXEL_VOLUMES as usize],

    /// x - number of active volumes
    /// y - teleportation portal index; zero when no teleport happened
    /// z - (as bool) reset history
    /// w - accumulation limit, in frames
    pub d0: UVec4,

    /// x,y,z - medium scattering coefficient
    /// w - medium phase anisotropy
    pub d1: Vec4,
}

impl VolumeArgs {
    pub fn active_volumes(&self) -> u32 {
        self.d0.x
    }

    pub fn teleportation_portal(&self) -> u32 {
        self.d0.y
    }

    pub fn reset_history(&self) -> bool {
        self.d0.z != 0
    }

    pub fn accumulation_limit(&self) -> f32 {
        self.d0.w as f32
    }

    pub fn scattering(&self) -> Vec3 {
        self.d1.xyz()
    }

    pub fn anisotropy(&self) -> f32 {
        self.d1.w
    }

    pub fn camera(&self, volume: u32) -> &VolumeCamera {
        unsafe { self.cameras.index_unchecked(volume as usize) }
    }
}
