use brume_gpu::prelude::*;

/// Marches each froxel column front-to-back, folding per-cell scattering
/// into preintegrated radiance and transmittance via Beer-Lambert.
///
/// Dispatched with one thread per (x, y) column and one workgroup layer per
/// volume; reads the grid the integration pass just wrote.
#[spirv(compute(threads(8, 8)))]
pub fn main(
    #[spirv(global_invocation_id)] global_id: UVec3,
    #[spirv(descriptor_set = 0, binding = 0, uniform)] args: &VolumeArgs,
    #[spirv(descriptor_set = 0, binding = 1, storage_buffer)]
    grid_cells: &[Vec4],
    #[spirv(descriptor_set = 0, binding = 2, storage_buffer)]
    preintegrated: &mut [Vec4],
) {
    let grid = args.grid;
    let volume = global_id.z;

    if global_id.x >= grid.size().x || global_id.y >= grid.size().y {
        return;
    }

    if volume >= args.active_volumes() {
        return;
    }

    let camera = args.camera(volume);
    let dist = DepthSliceDistribution::new(&grid, camera);

    // Mean extinction; the medium is purely scattering, so extinction equals
    // the scattering coefficient
    let sigma_t = args.scattering().dot(Vec3::ONE) / 3.0;

    let mut integrated = Vec3::ZERO;
    let mut transmittance = 1.0;
    let mut z = 0;

    while z < grid.size().z {
        let packed =
            grid.to_packed(uvec3(global_id.x, global_id.y, z), volume);

        let idx = grid.cell_to_idx(packed);
        let radiance = unsafe { *grid_cells.index_unchecked(idx) }.xyz();

        // Metric thickness of this slice; nonuniform due to the power-law
        // depth distribution
        let thickness = (dist.slice_to_view_z((z + 1) as f32)
            - dist.slice_to_view_z(z as f32))
        .abs();

        let absorbed = 1.0 - (-sigma_t * thickness).exp();

        integrated += transmittance * radiance * absorbed;
        transmittance *= 1.0 - absorbed;

        unsafe {
            *preintegrated.index_unchecked_mut(idx) =
                integrated.extend(transmittance);
        }

        z += 1;
    }
}
