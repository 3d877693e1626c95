use std::ops::{Deref, DerefMut};
use std::{any, mem};

use bytemuck::Pod;
use log::info;

use crate::buffers::{buffer_layout, pad_size};
use crate::Bindable;

/// Storage buffer mirrored on the host; the host rebuilds the contents (e.g.
/// the light list) and [`Self::flush()`] uploads them when they changed.
///
/// [`DerefMut`] marks the contents dirty.
#[derive(Debug)]
pub struct MappedStorageBuffer<T> {
    buffer: wgpu::Buffer,
    data: Vec<T>,
    dirty: bool,
}

impl<T> MappedStorageBuffer<T>
where
    T: Pod,
{
    /// Creates a buffer able to hold up to `capacity` items.
    pub fn new(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        capacity: usize,
    ) -> Self {
        let label = label.as_ref();
        let size = pad_size(capacity * mem::size_of::<T>());

        info!(
            "Allocating storage buffer `{label}`; item={}, size={size}",
            any::type_name::<T>(),
        );

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::STORAGE,
            size: size as _,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            data: Vec::with_capacity(capacity),
            dirty: true,
        }
    }

    pub fn flush(&mut self, queue: &wgpu::Queue) {
        if !mem::take(&mut self.dirty) {
            return;
        }

        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&self.data));
    }

    pub fn bind_readable(&self) -> impl Bindable + '_ {
        MappedStorageBufferBinder { parent: self }
    }
}

impl<T> Deref for MappedStorageBuffer<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for MappedStorageBuffer<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.dirty = true;

        &mut self.data
    }
}

struct MappedStorageBufferBinder<'a, T> {
    parent: &'a MappedStorageBuffer<T>,
}

impl<T> Bindable for MappedStorageBufferBinder<'_, T> {
    fn bind(
        &self,
        binding: u32,
    ) -> (wgpu::BindGroupLayoutEntry, wgpu::BindingResource) {
        (
            buffer_layout(
                binding,
                wgpu::BufferBindingType::Storage { read_only: true },
            ),
            self.parent.buffer.as_entire_binding(),
        )
    }
}
