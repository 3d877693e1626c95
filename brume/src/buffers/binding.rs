/// Buffer that can be attached to a compute pipeline, occupying one binding
/// slot.
pub trait Bindable {
    fn bind(
        &self,
        binding: u32,
    ) -> (wgpu::BindGroupLayoutEntry, wgpu::BindingResource);
}

/// Buffer that comes in two per-frame flavors swapped after each frame; the
/// frame parity decides which half ends up attached.
pub trait DoubleBufferedBindable {
    fn bind(
        &self,
        binding: u32,
    ) -> (wgpu::BindGroupLayoutEntry, [wgpu::BindingResource; 2]);
}

// A single-buffered resource is a double-buffered one whose halves happen to
// be the same buffer
impl<T> DoubleBufferedBindable for T
where
    T: Bindable,
{
    fn bind(
        &self,
        binding: u32,
    ) -> (wgpu::BindGroupLayoutEntry, [wgpu::BindingResource; 2]) {
        let (layout, resource) = T::bind(self, binding);

        (layout, [resource.clone(), resource])
    }
}

/// Pair of bind groups sharing one layout, one per frame parity.
#[derive(Debug)]
pub struct BindGroupPair {
    layout: wgpu::BindGroupLayout,
    groups: [wgpu::BindGroup; 2],
}

impl BindGroupPair {
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        items: &[&dyn DoubleBufferedBindable],
    ) -> Self {
        let mut layouts = Vec::new();
        let mut even = Vec::new();
        let mut odd = Vec::new();

        for (binding, item) in items.iter().enumerate() {
            let binding = binding as u32;
            let (layout, [resource_a, resource_b]) = item.bind(binding);

            layouts.push(layout);

            even.push(wgpu::BindGroupEntry {
                binding,
                resource: resource_a,
            });

            odd.push(wgpu::BindGroupEntry {
                binding,
                resource: resource_b,
            });
        }

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label}_layout")),
                entries: &layouts,
            });

        let groups = [even, odd].map(|entries| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &layout,
                entries: &entries,
            })
        });

        Self { layout, groups }
    }

    pub fn get(&self, alternate: bool) -> &wgpu::BindGroup {
        &self.groups[alternate as usize]
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }
}
