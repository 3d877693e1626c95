use brume_gpu::prelude::*;

/// Integrates in-scattered lighting for one froxel per invocation, blending
/// the fresh estimate with temporally-reprojected history from the previous
/// frame's grid.
///
/// Dispatched over the *packed* grid - all volumes at once, offset along the
/// x axis - with one thread per cell and 8x8 warps per depth slice.
#[spirv(compute(threads(8, 8)))]
pub fn main(
    #[spirv(global_invocation_id)] global_id: UVec3,
    #[spirv(push_constant)] params: &VolumeIntegratePassParams,
    #[spirv(descriptor_set = 0, binding = 0, storage_buffer)]
    lights: &[Light],
    #[spirv(descriptor_set = 1, binding = 0, uniform)] args: &VolumeArgs,
    #[spirv(descriptor_set = 1, binding = 1, storage_buffer)]
    prev_grid: &[Vec4],
    #[spirv(descriptor_set = 1, binding = 2, storage_buffer)]
    curr_grid: &mut [Vec4],
    #[spirv(descriptor_set = 1, binding = 3, storage_buffer)]
    inspection: &mut [Vec4],
) {
    let grid = args.grid;
    let volume = grid.volume_of(global_id);

    // The physical buffer is sized for the maximum volume count; skip cells
    // that fall outside the grid or belong to an inactive volume
    if global_id.y >= grid.size().y || global_id.z >= grid.size().z {
        return;
    }

    if volume >= args.active_volumes() {
        return;
    }

    let local = grid.to_local(global_id);
    let cell_idx = grid.cell_to_idx(global_id);
    let lights = LightsView::new(lights);
    let camera = args.camera(volume);
    let mut inspect = InspectionSink::new(inspection, params.inspection);

    // Keying the noise by `y + z * height` keeps depth slices decorrelated;
    // hashing the slice into the seed directly showed visible banding
    let mut wnoise = WhiteNoise::new(
        params.seed ^ params.frame,
        uvec2(global_id.x, global_id.y + global_id.z * grid.size().y),
    );

    // -------------------------------------------------------------------------

    // Stratified sample: the cell center, jittered uniformly over the cell
    let coordinate =
        index_to_coordinate(local) + wnoise.sample_vec3() - 0.5;

    let world_pos = grid.coordinate_to_world(camera, coordinate);
    let distance = world_pos.length();
    let dir_to_eye = -world_pos / distance.max(0.0001);

    let lookup = VolumeLookup::resolve(args, world_pos, volume);

    let radiance = eval_in_scatter(
        lights,
        world_pos,
        dir_to_eye,
        args.scattering(),
        args.anisotropy(),
    );

    // -------------------------------------------------------------------------

    let mut previous = Vec4::ZERO;

    if lookup.is_some() {
        previous = TrilinearFilter::reproject(lookup.coordinate, |tap| {
            if grid.contains(tap) {
                let idx = grid
                    .cell_to_idx(grid.to_packed(tap.as_uvec3(), lookup.volume));

                (unsafe { *prev_grid.index_unchecked(idx) }, 1.0)
            } else {
                (Vec4::ZERO, 0.0)
            }
        });
    }

    let cell = if lookup.is_some() {
        accumulate(previous, radiance, args.accumulation_limit())
    } else {
        radiance.extend(0.0)
    };

    unsafe {
        *curr_grid.index_unchecked_mut(cell_idx) = cell;
    }

    // -------------------------------------------------------------------------

    inspect.record(INSPECT_PREV_UVW, cell_idx, lookup.uvw.extend(0.0));

    inspect.record(
        INSPECT_REPROJECTION_VALIDITY,
        cell_idx,
        vec4(lookup.exists as f32, lookup.valid as f32, 0.0, 0.0),
    );

    inspect.record(INSPECT_VIEW_DISTANCE, cell_idx, Vec4::splat(distance));
    inspect.record(INSPECT_HISTORY_AGE, cell_idx, Vec4::splat(cell.w));
}
