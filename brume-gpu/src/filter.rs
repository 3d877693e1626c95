use glam::{ivec3, vec4, IVec3, Vec3, Vec4};

/// Manual trilinear filter over the froxel grid.
///
/// Grid cells store their sample at the cell center (`index + 0.5`), so the
/// eight taps surrounding a froxel coordinate start at
/// `floor(coordinate - 0.5)`. Taps can be rejected individually (e.g. when
/// they fall outside the grid) by handing back a zero weight from the sample
/// callback.
#[derive(Clone, Copy)]
pub struct TrilinearFilter {
    /// Samples at `f(x, y, z=0)`, in s00/s10/s01/s11 order
    pub near: [Vec4; 4],

    /// Samples at `f(x, y, z=1)`, in the same order
    pub far: [Vec4; 4],

    /// Weights for the near samples
    pub near_weights: Vec4,

    /// Weights for the far samples
    pub far_weights: Vec4,
}

impl TrilinearFilter {
    pub fn reproject(
        coordinate: Vec3,
        sample: impl Fn(IVec3) -> (Vec4, f32),
    ) -> Vec4 {
        let base = coordinate - 0.5;
        let floor = base.floor();

        Self::from_taps(floor.as_ivec3(), sample).eval(base - floor)
    }

    pub fn from_taps(
        base: IVec3,
        sample: impl Fn(IVec3) -> (Vec4, f32),
    ) -> Self {
        let mut near = [Vec4::ZERO; 4];
        let mut far = [Vec4::ZERO; 4];
        let mut near_weights = Vec4::ZERO;
        let mut far_weights = Vec4::ZERO;

        (near[0], near_weights.x) = sample(base);
        (near[1], near_weights.y) = sample(base + ivec3(1, 0, 0));
        (near[2], near_weights.z) = sample(base + ivec3(0, 1, 0));
        (near[3], near_weights.w) = sample(base + ivec3(1, 1, 0));

        (far[0], far_weights.x) = sample(base + ivec3(0, 0, 1));
        (far[1], far_weights.y) = sample(base + ivec3(1, 0, 1));
        (far[2], far_weights.z) = sample(base + ivec3(0, 1, 1));
        (far[3], far_weights.w) = sample(base + ivec3(1, 1, 1));

        Self {
            near,
            far,
            near_weights,
            far_weights,
        }
    }

    pub fn eval(&self, frac: Vec3) -> Vec4 {
        let plane = vec4(
            (1.0 - frac.x) * (1.0 - frac.y),
            frac.x * (1.0 - frac.y),
            (1.0 - frac.x) * frac.y,
            frac.x * frac.y,
        );

        let near_weights = self.near_weights * plane * (1.0 - frac.z);
        let far_weights = self.far_weights * plane * frac.z;

        let w_sum =
            near_weights.dot(Vec4::ONE) + far_weights.dot(Vec4::ONE);

        if w_sum == 0.0 {
            Default::default()
        } else {
            (self.near[0] * near_weights.x
                + self.near[1] * near_weights.y
                + self.near[2] * near_weights.z
                + self.near[3] * near_weights.w
                + self.far[0] * far_weights.x
                + self.far[1] * far_weights.y
                + self.far[2] * far_weights.z
                + self.far[3] * far_weights.w)
                / w_sum
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    #[test]
    fn exact_cell_center_returns_that_cell() {
        let value = TrilinearFilter::reproject(vec3(2.5, 3.5, 4.5), |tap| {
            if tap == ivec3(2, 3, 4) {
                (Vec4::splat(7.0), 1.0)
            } else {
                (Vec4::splat(1000.0), 1.0)
            }
        });

        assert_relative_eq!(7.0, value.x, max_relative = 1e-5);
    }

    #[test]
    fn halfway_between_two_cells_averages_them() {
        let value = TrilinearFilter::reproject(vec3(3.0, 3.5, 4.5), |tap| {
            if tap == ivec3(2, 3, 4) {
                (Vec4::splat(2.0), 1.0)
            } else if tap == ivec3(3, 3, 4) {
                (Vec4::splat(4.0), 1.0)
            } else {
                (Vec4::ZERO, 0.0)
            }
        });

        assert_relative_eq!(3.0, value.x, max_relative = 1e-5);
    }

    #[test]
    fn rejected_taps_renormalize() {
        let value = TrilinearFilter::reproject(vec3(0.5, 0.5, 0.75), |tap| {
            if tap == ivec3(0, 0, 0) {
                (Vec4::splat(8.0), 1.0)
            } else {
                // Everything else is out of bounds
                (Vec4::ZERO, 0.0)
            }
        });

        assert_relative_eq!(8.0, value.x, max_relative = 1e-5);
    }

    #[test]
    fn all_taps_rejected_yields_zero() {
        let value = TrilinearFilter::reproject(vec3(1.5, 1.5, 1.5), |_| {
            (Vec4::splat(3.0), 0.0)
        });

        assert_eq!(Vec4::ZERO, value);
    }
}
