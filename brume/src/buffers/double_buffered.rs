use crate::buffers::buffer_layout;
use crate::{DoubleBufferedBindable, UnmappedStorageBuffer};

/// Pair of identical buffers swapped after each frame; one half is the
/// current frame's write target, the other the previous frame's read-only
/// history.
#[derive(Debug)]
pub struct DoubleBuffered<T> {
    buffers: [T; 2],
}

impl DoubleBuffered<UnmappedStorageBuffer> {
    /// See: [`UnmappedStorageBuffer::new()`].
    pub fn new(
        device: &wgpu::Device,
        label: impl AsRef<str>,
        size: usize,
    ) -> Self {
        let label = label.as_ref();

        Self {
            buffers: [
                UnmappedStorageBuffer::new(device, format!("{label}_a"), size),
                UnmappedStorageBuffer::new(device, format!("{label}_b"), size),
            ],
        }
    }

    /// This frame's write target.
    pub fn curr(&self) -> DoubleBufferedView<'_> {
        DoubleBufferedView {
            even: &self.buffers[0],
            odd: &self.buffers[1],
        }
    }

    /// The previous frame's half, i.e. [`Self::curr()`] with the parity
    /// flipped.
    pub fn past(&self) -> DoubleBufferedView<'_> {
        DoubleBufferedView {
            even: &self.buffers[1],
            odd: &self.buffers[0],
        }
    }
}

/// One parity-resolved side of a [`DoubleBuffered`] pair.
#[derive(Clone, Copy)]
pub struct DoubleBufferedView<'a> {
    even: &'a UnmappedStorageBuffer,
    odd: &'a UnmappedStorageBuffer,
}

impl<'a> DoubleBufferedView<'a> {
    pub fn bind_readable(self) -> impl DoubleBufferedBindable + 'a {
        DoubleBufferedViewBinder {
            view: self,
            read_only: true,
        }
    }

    pub fn bind_writable(self) -> impl DoubleBufferedBindable + 'a {
        DoubleBufferedViewBinder {
            view: self,
            read_only: false,
        }
    }
}

struct DoubleBufferedViewBinder<'a> {
    view: DoubleBufferedView<'a>,
    read_only: bool,
}

impl DoubleBufferedBindable for DoubleBufferedViewBinder<'_> {
    fn bind(
        &self,
        binding: u32,
    ) -> (wgpu::BindGroupLayoutEntry, [wgpu::BindingResource; 2]) {
        (
            buffer_layout(
                binding,
                wgpu::BufferBindingType::Storage {
                    read_only: self.read_only,
                },
            ),
            [self.view.even.as_binding(), self.view.odd.as_binding()],
        )
    }
}
