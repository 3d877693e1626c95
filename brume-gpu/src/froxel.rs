use bytemuck::{Pod, Zeroable};
use glam::{
    uvec3, vec2, vec3, vec4, IVec3, UVec2, UVec3, UVec4, Vec3, Vec4,
    Vec4Swizzles,
};
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::{DepthSliceDistribution, F32Ext, VolumeCamera, MAX_FROXEL_VOLUMES};

/// Shape of the froxel grid, shared by all volumes.
///
/// Coordinates come in three flavors:
///
/// - froxel index, `UVec3` in `[0, size)` - addresses a single cell,
/// - froxel coordinate, `Vec3` in `[0, size]` - a position within the grid,
///   with `index + 0.5` being the cell's canonical center,
/// - froxel UVW, `Vec3` in `[0, 1]^3` - normalized coordinate for filtered
///   lookups, sharing the screen-UV convention in x/y (top-left origin).
#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct FroxelGrid {
    /// x - grid width, per volume
    /// y - grid height
    /// z - depth slices
    /// w - unused
    pub d0: UVec4,

    /// x - depth distribution exponent
    /// y - depth distribution max distance
    /// z - unused
    /// w - unused
    pub d1: Vec4,
}

impl FroxelGrid {
    pub fn new(
        size: UVec2,
        depth_slices: u32,
        exponent: f32,
        max_distance: f32,
    ) -> Self {
        Self {
            d0: UVec4::new(size.x, size.y, depth_slices, 0),
            d1: vec4(exponent, max_distance, 0.0, 0.0),
        }
    }

    pub fn size(&self) -> UVec3 {
        self.d0.xyz()
    }

    pub fn sizef(&self) -> Vec3 {
        self.size().as_vec3()
    }

    pub fn exponent(&self) -> f32 {
        self.d1.x
    }

    pub fn max_distance(&self) -> f32 {
        self.d1.y
    }

    pub fn coordinate_to_uvw(&self, coordinate: Vec3) -> Vec3 {
        coordinate / self.sizef()
    }

    pub fn uvw_to_coordinate(&self, uvw: Vec3) -> Vec3 {
        uvw * self.sizef()
    }

    /// Returns which volume owns given packed froxel index; volumes are
    /// packed along the x axis of the physical grid.
    pub fn volume_of(&self, index: UVec3) -> u32 {
        index.x / self.d0.x
    }

    /// Strips the volume offset off a packed froxel index.
    pub fn to_local(&self, index: UVec3) -> UVec3 {
        uvec3(index.x % self.d0.x, index.y, index.z)
    }

    /// Re-applies the volume offset to a local froxel index.
    pub fn to_packed(&self, local: UVec3, volume: u32) -> UVec3 {
        uvec3(local.x + volume * self.d0.x, local.y, local.z)
    }

    /// Given a packed froxel index, returns a unique index for it; used to
    /// address the flat grid storage buffers.
    pub fn cell_to_idx(&self, index: UVec3) -> usize {
        let width = self.d0.x * MAX_FROXEL_VOLUMES;

        ((index.z * self.d0.y + index.y) * width + index.x) as usize
    }

    /// Returns whether given local froxel index lays inside the grid.
    pub fn contains(&self, index: IVec3) -> bool {
        let size = self.size().as_ivec3();

        index.x >= 0
            && index.y >= 0
            && index.z >= 0
            && index.x < size.x
            && index.y < size.y
            && index.z < size.z
    }

    /// Given a froxel coordinate, returns its position in translated-world
    /// space, i.e. relative to the camera's origin.
    ///
    /// Inputs behind the near plane are not representable here - projecting
    /// the depth slice yields a z that gets its absolute value clamped to
    /// `[0, 1]`, so such inputs silently fold onto the frustum; callers must
    /// hand in coordinates at or beyond the near plane.
    pub fn coordinate_to_world(
        &self,
        camera: &VolumeCamera,
        coordinate: Vec3,
    ) -> Vec3 {
        let dist = DepthSliceDistribution::new(self, camera);
        let view_z = dist.slice_to_view_z(coordinate.z);

        let clip = camera.projection * vec4(0.0, 0.0, view_z, 1.0);
        let mut ndc_z = clip.z / clip.w;

        // NaN/Inf here means z ~= 0 or precision loss at the near plane, not
        // a meaningful sample; substitute the near plane itself
        if !ndc_z.is_finite() {
            ndc_z = 0.0;
        }

        let ndc_z = ndc_z.abs().saturate();

        let uvw = self.coordinate_to_uvw(coordinate);
        let ndc = vec2(2.0 * uvw.x - 1.0, -(2.0 * uvw.y - 1.0));

        let world = camera.ndc_to_world * vec4(ndc.x, ndc.y, ndc_z, 1.0);

        world.xyz() / world.w
    }

    /// Given a position in translated-world space, returns its froxel UVW
    /// under the camera's current matrices.
    pub fn world_to_uvw(&self, camera: &VolumeCamera, world: Vec3) -> Vec3 {
        self.project_to_uvw(camera, world, false)
    }

    /// Given a position in translated-world space, returns its froxel UVW
    /// under the camera's previous-frame matrices; used for reprojection.
    pub fn world_to_prev_uvw(
        &self,
        camera: &VolumeCamera,
        world: Vec3,
    ) -> Vec3 {
        self.project_to_uvw(camera, world, true)
    }

    fn project_to_uvw(
        &self,
        camera: &VolumeCamera,
        world: Vec3,
        prev: bool,
    ) -> Vec3 {
        let (view, projection) = if prev {
            (camera.prev_view, camera.prev_projection)
        } else {
            (camera.view, camera.projection)
        };

        let view_pos = view * world.extend(1.0);
        let clip = projection * view_pos;
        let ndc = clip.xy() / clip.w;

        let uv = vec2(0.5 * ndc.x + 0.5, -0.5 * ndc.y + 0.5);

        let dist = DepthSliceDistribution::new(self, camera);
        let slice = dist.view_z_to_slice(view_pos.z);

        vec3(uv.x, uv.y, slice / self.sizef().z)
    }
}

/// Truncates a froxel coordinate down to the index of its cell; the caller is
/// responsible for the coordinate being in bounds.
pub fn coordinate_to_index(coordinate: Vec3) -> UVec3 {
    coordinate.as_uvec3()
}

/// Returns the froxel coordinate of given cell's center; this is the
/// canonical representative point used for sampling and reprojection.
pub fn index_to_coordinate(index: UVec3) -> Vec3 {
    index.as_vec3() + 0.5
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{uvec2, Mat4};

    use super::*;

    fn grid() -> FroxelGrid {
        FroxelGrid::new(uvec2(16, 12), 24, 2.0, 60.0)
    }

    fn camera() -> VolumeCamera {
        let view = Mat4::IDENTITY;
        let projection =
            Mat4::perspective_rh(1.2, 16.0 / 12.0, 0.1, 100.0);

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

    #[test]
    fn uvw_round_trip() {
        let grid = grid();

        let mut z = 0;

        while z < 24 {
            let coordinate = index_to_coordinate(uvec3(z % 16, z % 12, z));
            let there = grid.coordinate_to_uvw(coordinate);
            let back = grid.uvw_to_coordinate(there);

            assert_relative_eq!(coordinate.x, back.x, max_relative = 1e-5);
            assert_relative_eq!(coordinate.y, back.y, max_relative = 1e-5);
            assert_relative_eq!(coordinate.z, back.z, max_relative = 1e-5);

            z += 1;
        }
    }

    #[test]
    fn cell_center_convention() {
        for idx in [uvec3(0, 0, 0), uvec3(1, 2, 3), uvec3(15, 11, 23)] {
            assert_eq!(
                idx.as_vec3() + Vec3::splat(0.5),
                index_to_coordinate(idx)
            );
        }
    }

    #[test]
    fn index_truncation() {
        assert_eq!(uvec3(3, 7, 11), coordinate_to_index(vec3(3.9, 7.1, 11.5)));
        assert_eq!(uvec3(0, 0, 0), coordinate_to_index(vec3(0.0, 0.5, 0.99)));
    }

    #[test]
    fn packed_addressing() {
        let grid = grid();

        let local = uvec3(5, 7, 9);
        let packed = grid.to_packed(local, 2);

        assert_eq!(uvec3(37, 7, 9), packed);
        assert_eq!(2, grid.volume_of(packed));
        assert_eq!(local, grid.to_local(packed));
    }

    #[test]
    fn cell_to_idx_is_bijective() {
        let grid = FroxelGrid::new(uvec2(4, 4), 4, 1.0, 10.0);
        let mut seen = std::collections::HashSet::new();

        for z in 0..4 {
            for y in 0..4 {
                for x in 0..(4 * MAX_FROXEL_VOLUMES) {
                    assert!(seen.insert(grid.cell_to_idx(uvec3(x, y, z))));
                }
            }
        }

        assert!(seen.iter().all(|&idx| idx < seen.len()));
    }

    #[test]
    fn world_round_trip() {
        let grid = grid();
        let camera = camera();

        for idx in [uvec3(0, 0, 0), uvec3(8, 6, 12), uvec3(15, 11, 23)] {
            let coordinate = index_to_coordinate(idx);
            let world = grid.coordinate_to_world(&camera, coordinate);
            let uvw = grid.world_to_uvw(&camera, world);
            let back = grid.uvw_to_coordinate(uvw);

            assert_relative_eq!(
                coordinate.x,
                back.x,
                max_relative = 1e-3,
                epsilon = 1e-3
            );

            assert_relative_eq!(
                coordinate.y,
                back.y,
                max_relative = 1e-3,
                epsilon = 1e-3
            );

            assert_relative_eq!(
                coordinate.z,
                back.z,
                max_relative = 1e-3,
                epsilon = 1e-3
            );
        }
    }
}
