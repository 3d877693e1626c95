mod f32_ext;

use core::ops;

use glam::{Vec3, Vec4};

pub use self::f32_ext::*;

pub fn lerp<T>(a: T, b: T, t: f32) -> T
where
    T: ops::Add<Output = T>,
    T: ops::Sub<Output = T>,
    T: ops::Mul<f32, Output = T>,
    T: Copy,
{
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Blends a fresh sample into accumulated history.
///
/// Cells carry `Vec4(rgb radiance, w age)`; the blend weight is `1/(age+1)`,
/// so young cells converge quickly while mature ones change slowly. The age
/// is clamped to `limit` before blending, which bounds how long stale
/// lighting can linger.
pub fn accumulate(history: Vec4, sample: Vec3, limit: f32) -> Vec4 {
    let age = history.w.min(limit);
    let color = lerp(history.truncate(), sample, 1.0 / (age + 1.0));

    color.extend(age + 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{vec3, vec4};

    use super::*;

    #[test]
    fn accumulate_weighs_by_age() {
        // Age 0: the sample replaces the history outright
        let cell =
            accumulate(vec4(1.0, 1.0, 1.0, 0.0), vec3(5.0, 5.0, 5.0), 64.0);

        assert_relative_eq!(5.0, cell.x);
        assert_relative_eq!(1.0, cell.w);

        // Age 3: the sample contributes 1/4
        let cell =
            accumulate(vec4(1.0, 1.0, 1.0, 3.0), vec3(5.0, 5.0, 5.0), 64.0);

        assert_relative_eq!(2.0, cell.x);
        assert_relative_eq!(4.0, cell.w);
    }

    #[test]
    fn accumulate_respects_the_age_limit() {
        let cell =
            accumulate(vec4(0.0, 0.0, 0.0, 1000.0), vec3(9.0, 9.0, 9.0), 8.0);

        assert_relative_eq!(1.0, cell.x);
        assert_relative_eq!(9.0, cell.w);
    }
}
