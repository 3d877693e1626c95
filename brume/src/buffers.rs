mod binding;
mod double_buffered;
mod mapped_storage_buffer;
mod mapped_uniform_buffer;
mod unmapped_storage_buffer;

pub use self::binding::*;
pub use self::double_buffered::*;
pub use self::mapped_storage_buffer::*;
pub use self::mapped_uniform_buffer::*;
pub use self::unmapped_storage_buffer::*;

/// Rounds buffer sizes up so that they match wgpu's allocation granularity.
pub(crate) fn pad_size(size: usize) -> usize {
    (size + 31) & !31
}

/// Layout entry for a buffer occupying a single binding slot; all of brume's
/// buffers are compute-only and bind whole.
pub(crate) fn buffer_layout(
    binding: u32,
    ty: wgpu::BufferBindingType,
) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}
