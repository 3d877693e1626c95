use glam::{vec3, UVec2, Vec3};

#[derive(Copy, Clone)]
pub struct WhiteNoise {
    state: u32,
}

impl WhiteNoise {
    pub fn new(seed: u32, id: UVec2) -> Self {
        Self {
            state: seed
                ^ 48619u32.wrapping_mul(id.x)
                ^ 95461u32.wrapping_mul(id.y),
        }
    }

    /// Generates a uniform sample in range `<0.0, 1.0)`.
    ///
    /// The high 24 bits are exactly representable in an f32 mantissa, so the
    /// division is exact and the result never rounds up to 1.0.
    pub fn sample(&mut self) -> f32 {
        ((self.sample_int() >> 8) as f32) / 16777216.0
    }

    /// Generates a uniform sample in range `<0, u32::MAX>`.
    pub fn sample_int(&mut self) -> u32 {
        self.state =
            self.state.wrapping_mul(747796405).wrapping_add(2891336453);

        let word = ((self.state >> ((self.state >> 28) + 4)) ^ self.state)
            .wrapping_mul(277803737);

        (word >> 22) ^ word
    }

    /// Generates a uniform sample inside the unit cube; used for sub-cell
    /// jittering.
    pub fn sample_vec3(&mut self) -> Vec3 {
        vec3(self.sample(), self.sample(), self.sample())
    }
}

#[cfg(test)]
mod tests {
    use glam::uvec2;

    use super::*;

    #[test]
    fn samples_stay_in_range() {
        let mut wnoise = WhiteNoise::new(0xcafebabe, uvec2(12, 34));

        for _ in 0..1024 {
            let sample = wnoise.sample();

            assert!(sample >= 0.0 && sample < 1.0);
        }
    }

    #[test]
    fn jitter_stays_within_the_cell() {
        let mut wnoise = WhiteNoise::new(0xdeadbeef, uvec2(3, 7));

        for _ in 0..256 {
            let offset = wnoise.sample_vec3() - 0.5;

            assert!(offset.cmpge(Vec3::splat(-0.5)).all());
            assert!(offset.cmplt(Vec3::splat(0.5)).all());
        }
    }

    #[test]
    fn streams_differ_across_cells() {
        let mut a = WhiteNoise::new(123, uvec2(1, 2));
        let mut b = WhiteNoise::new(123, uvec2(1, 3));

        let different = (0..16).any(|_| a.sample_int() != b.sample_int());

        assert!(different);
    }
}
