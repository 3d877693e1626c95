use glam::{vec3, UVec2, Vec3};

/// Static configuration of a volume controller.
///
/// Changing any of the grid-shape parameters at runtime requires
/// [`crate::VolumeController::set_settings()`], which reallocates the grid
/// and drops the accumulated history.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeSettings {
    /// Froxel grid resolution in x/y, per volume.
    pub grid_size: UVec2,

    /// Number of depth slices.
    pub depth_slices: u32,

    /// Exponent of the power-law depth-slice distribution; one gives a
    /// linear grid, larger values pack more slices near the camera.
    pub exponent: f32,

    /// View-space distance covered by the grid, starting at the near plane.
    pub max_distance: f32,

    /// Maximum history age, in frames; bounds how long stale lighting can
    /// linger at the cost of more noise when lower.
    pub accumulation_limit: u32,

    /// Scattering coefficient of the participating medium, per channel.
    pub scattering: Vec3,

    /// Henyey-Greenstein phase anisotropy; zero is isotropic.
    pub anisotropy: f32,
}

impl VolumeSettings {
    pub fn validate(&self) {
        assert!(
            self.grid_size.x > 0 && self.grid_size.y > 0,
            "grid_size must be positive, got {:?}",
            self.grid_size,
        );

        assert!(
            self.depth_slices > 0,
            "depth_slices must be positive, got {}",
            self.depth_slices,
        );

        assert!(
            self.exponent > 0.0,
            "exponent must be positive, got {}",
            self.exponent,
        );

        assert!(
            self.max_distance > 0.0,
            "max_distance must be positive, got {}",
            self.max_distance,
        );

        assert!(
            self.anisotropy > -1.0 && self.anisotropy < 1.0,
            "anisotropy must lay in (-1, 1), got {}",
            self.anisotropy,
        );
    }

    pub fn describe(&self) -> String {
        format!(
            "{}x{}x{}",
            self.grid_size.x, self.grid_size.y, self.depth_slices,
        )
    }
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            grid_size: UVec2::new(32, 24),
            depth_slices: 48,
            exponent: 2.0,
            max_distance: 100.0,
            accumulation_limit: 64,
            scattering: vec3(0.005, 0.005, 0.005),
            anisotropy: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        VolumeSettings::default().validate();
    }

    #[test]
    #[should_panic(expected = "exponent must be positive")]
    fn rejects_non_positive_exponent() {
        VolumeSettings {
            exponent: 0.0,
            ..Default::default()
        }
        .validate();
    }

    #[test]
    #[should_panic(expected = "grid_size must be positive")]
    fn rejects_empty_grid() {
        VolumeSettings {
            grid_size: UVec2::new(0, 24),
            ..Default::default()
        }
        .validate();
    }
}
