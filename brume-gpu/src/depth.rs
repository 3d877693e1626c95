#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::{F32Ext, FroxelGrid, VolumeCamera};

/// Power-law mapping between the depth-slice axis of the froxel grid and
/// linear view-space depth.
///
/// The exponent packs near-camera slices finer and far slices coarser;
/// `exponent = 1` degenerates to a linear grid.
///
/// Assembled transiently from the grid and the owning camera - it carries no
/// state of its own.
#[derive(Clone, Copy)]
pub struct DepthSliceDistribution {
    pub slices: f32,
    pub exponent: f32,
    pub max_distance: f32,
    pub near_plane: f32,
    pub view_z_sign: f32,
}

impl DepthSliceDistribution {
    pub fn new(grid: &FroxelGrid, camera: &VolumeCamera) -> Self {
        Self {
            slices: grid.sizef().z,
            exponent: grid.exponent(),
            max_distance: grid.max_distance(),
            near_plane: camera.near_plane(),
            view_z_sign: camera.view_z_sign(),
        }
    }

    /// Maps a depth slice to view-space depth.
    ///
    /// Slices outside `[0, slices]` collapse onto the near plane or
    /// `max_distance` through the saturate.
    pub fn slice_to_view_z(&self, slice: f32) -> f32 {
        let z = (slice / self.slices).saturate().powf(self.exponent)
            * self.max_distance;

        (z + self.near_plane) * self.view_z_sign
    }

    /// Maps view-space depth back to a depth slice.
    ///
    /// Exact inverse of [`Self::slice_to_view_z()`] only in-domain and with a
    /// consistent sign; the `1 / exponent` power amplifies floating-point
    /// error as the exponent diverges from one.
    pub fn view_z_to_slice(&self, view_z: f32) -> f32 {
        let z = view_z * self.view_z_sign - self.near_plane;

        (z / self.max_distance).saturate().powf(1.0 / self.exponent)
            * self.slices
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn dist(exponent: f32) -> DepthSliceDistribution {
        DepthSliceDistribution {
            slices: 32.0,
            exponent,
            max_distance: 80.0,
            near_plane: 0.1,
            view_z_sign: -1.0,
        }
    }

    #[test]
    fn forward_is_monotonic() {
        for exponent in [0.5, 1.0, 2.0, 3.5] {
            let dist = dist(exponent);
            let mut prev = dist.slice_to_view_z(0.0).abs();
            let mut slice = 1;

            while slice <= 32 {
                let curr = dist.slice_to_view_z(slice as f32).abs();

                assert!(
                    curr >= prev,
                    "not monotonic at slice={slice}, exponent={exponent}"
                );

                prev = curr;
                slice += 1;
            }
        }
    }

    #[test]
    fn inverse_round_trip() {
        for exponent in [0.5, 1.0, 2.0] {
            let dist = dist(exponent);
            let mut slice = 1;

            // Slice zero sits on the saturate boundary where the inverse
            // flattens; that end is covered by `saturates_out_of_domain`
            while slice <= 32 {
                let there = dist.slice_to_view_z(slice as f32);
                let back = dist.view_z_to_slice(there);

                assert_relative_eq!(
                    slice as f32,
                    back,
                    max_relative = 1e-3,
                    epsilon = 1e-3
                );

                slice += 1;
            }
        }
    }

    #[test]
    fn saturates_out_of_domain() {
        let dist = dist(2.0);

        // Beyond-range slices collapse to the far end
        assert_eq!(
            dist.slice_to_view_z(32.0),
            dist.slice_to_view_z(48.0)
        );

        // Depths closer than the near plane collapse to slice zero
        assert_eq!(0.0, dist.view_z_to_slice(-0.05));
        assert_eq!(0.0, dist.view_z_to_slice(0.0));

        // Depths past the max distance collapse to the last slice
        assert_eq!(32.0, dist.view_z_to_slice(-500.0));
    }

    #[test]
    fn linear_when_exponent_is_one() {
        let dist = dist(1.0);

        assert_relative_eq!(
            -(0.1 + 40.0),
            dist.slice_to_view_z(16.0),
            max_relative = 1e-5
        );
    }

    #[test]
    fn respects_view_z_sign() {
        let mut dist = dist(2.0);

        dist.view_z_sign = 1.0;

        assert!(dist.slice_to_view_z(16.0) > 0.0);
        assert_relative_eq!(
            16.0,
            dist.view_z_to_slice(dist.slice_to_view_z(16.0)),
            max_relative = 1e-3
        );
    }
}
