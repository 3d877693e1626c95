use core::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4, Vec4Swizzles};
use spirv_std::arch::IndexUnchecked;
#[cfg(target_arch = "spirv")]
use spirv_std::num_traits::Float;

use crate::F32Ext;

#[repr(C)]
#[derive(Clone, Copy, Default, Pod, Zeroable)]
#[cfg_attr(not(target_arch = "spirv"), derive(Debug))]
pub struct Light {
    /// x - position x
    /// y - position y
    /// z - position z
    /// w - radius
    pub d0: Vec4,

    /// x - color r
    /// y - color g
    /// z - color b
    /// w - range
    pub d1: Vec4,
}

impl Light {
    pub fn point(pos: Vec3, radius: f32, color: Vec3, range: f32) -> Self {
        Self {
            d0: pos.extend(radius),
            d1: color.extend(range),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.d0.xyz()
    }

    pub fn radius(&self) -> f32 {
        self.d0.w
    }

    pub fn color(&self) -> Vec3 {
        self.d1.xyz()
    }

    pub fn range(&self) -> f32 {
        self.d1.w
    }
}

#[derive(Clone, Copy)]
pub struct LightsView<'a> {
    items: &'a [Light],
}

impl<'a> LightsView<'a> {
    pub fn new(items: &'a [Light]) -> Self {
        Self { items }
    }

    pub fn get(&self, id: u32) -> Light {
        unsafe { *self.items.index_unchecked(id as usize) }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Henyey-Greenstein phase function; `g = 0` degenerates to isotropic
/// scattering.
pub fn henyey_greenstein(cos_theta: f32, g: f32) -> f32 {
    let denom = 1.0 + g * g - 2.0 * g * cos_theta;

    (1.0 - g * g) / (4.0 * PI * denom * denom.max(0.0001).sqrt())
}

/// Estimates the radiance in-scattered towards the eye at given point of the
/// participating medium.
///
/// Note that this function doesn't perform any visibility checks - it's an
/// unshadowed estimate; occlusion belongs to the surface integrator, which
/// is not part of the volumetric pass.
pub fn eval_in_scatter(
    lights: LightsView,
    world_pos: Vec3,
    dir_to_eye: Vec3,
    scattering: Vec3,
    anisotropy: f32,
) -> Vec3 {
    fn distance_attenuation(
        distance_square: f32,
        inverse_range_squared: f32,
    ) -> f32 {
        let factor = distance_square * inverse_range_squared;
        let smooth_factor = (1.0 - factor * factor).saturate();
        let attenuation = smooth_factor * smooth_factor;

        attenuation / distance_square.max(0.0001)
    }

    let mut radiance = Vec3::ZERO;
    let mut id = 0;

    while id < lights.len() as u32 {
        let light = lights.get(id);
        let to_light = light.center() - world_pos;

        let distance_factor = distance_attenuation(
            to_light.length_squared(),
            1.0 / light.range().sqr(),
        );

        let light_dir = to_light / to_light.length().max(0.0001);

        let phase =
            henyey_greenstein(light_dir.dot(dir_to_eye), anisotropy);

        radiance += light.color() * distance_factor * phase;

        id += 1;
    }

    radiance * scattering
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec3;

    use super::*;

    #[test]
    fn phase_integrates_to_one_when_isotropic() {
        assert_relative_eq!(
            1.0 / (4.0 * PI),
            henyey_greenstein(0.3, 0.0),
            max_relative = 1e-5
        );
    }

    #[test]
    fn forward_anisotropy_prefers_forward_scattering() {
        assert!(henyey_greenstein(1.0, 0.5) > henyey_greenstein(-1.0, 0.5));
    }

    #[test]
    fn lights_out_of_range_contribute_nothing() {
        let lights = [Light::point(
            vec3(0.0, 0.0, 0.0),
            0.1,
            vec3(1.0, 1.0, 1.0),
            10.0,
        )];

        let radiance = eval_in_scatter(
            LightsView::new(&lights),
            vec3(50.0, 0.0, 0.0),
            vec3(0.0, 0.0, 1.0),
            vec3(0.1, 0.1, 0.1),
            0.0,
        );

        assert_eq!(Vec3::ZERO, radiance);
    }

    #[test]
    fn closer_points_catch_more_light() {
        let lights = [Light::point(
            vec3(0.0, 0.0, 0.0),
            0.1,
            vec3(1.0, 1.0, 1.0),
            100.0,
        )];

        let eval = |x: f32| {
            eval_in_scatter(
                LightsView::new(&lights),
                vec3(x, 0.0, 0.0),
                vec3(0.0, 0.0, 1.0),
                vec3(0.1, 0.1, 0.1),
                0.0,
            )
        };

        assert!(eval(1.0).x > eval(2.0).x);
    }
}
