//! Common structs, algorithms etc. used by Brume's shaders and host renderer.

#![cfg_attr(target_arch = "spirv", no_std)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::manual_range_contains)]

mod depth;
mod filter;
mod froxel;
mod inspect;
mod noise;
mod passes;
mod reprojection;
mod scatter;
mod utils;
mod volume;

pub use self::depth::*;
pub use self::filter::*;
pub use self::froxel::*;
pub use self::inspect::*;
pub use self::noise::*;
pub use self::passes::*;
pub use self::reprojection::*;
pub use self::scatter::*;
pub use self::utils::*;
pub use self::volume::*;

pub mod prelude {
    pub use core::f32::consts::PI;

    pub use spirv_std::arch::IndexUnchecked;
    pub use spirv_std::glam::*;
    #[cfg(target_arch = "spirv")]
    pub use spirv_std::num_traits::Float;
    pub use spirv_std::spirv;

    pub use crate::*;
}

/// Maximum number of froxel volumes packed into the grid storage.
///
/// The physical grid is always allocated for this many volumes (main world
/// plus two portal spaces) and addressed by a volume offset along the x axis;
/// `VolumeArgs::active_volumes()` says how many of them are live this frame.
pub const MAX_FROXEL_VOLUMES: u32 = 3;

/// Index of the main-world volume.
///
/// Portal volumes use the remaining indices; index zero also doubles as the
/// "no teleportation" value of `VolumeArgs::teleportation_portal()`.
pub const FROXEL_VOLUME_MAIN: u32 = 0;
