use std::marker::PhantomData;
use std::mem;
use std::ops::Range;

use bytemuck::Pod;
use glam::UVec3;
use log::debug;

use crate::{BindGroupPair, DoubleBufferedBindable, VolumeController};

/// Compute pass over the froxel grid; binds each descriptor set in both
/// frame parities and picks the right one at dispatch time.
#[derive(Debug)]
pub struct VolumeComputePass<P = ()> {
    label: String,
    bind_groups: Vec<BindGroupPair>,
    pipeline: wgpu::ComputePipeline,
    _params: PhantomData<P>,
}

impl<P> VolumeComputePass<P>
where
    P: Pod,
{
    pub fn builder<'a>(label: impl ToString) -> VolumePassBuilder<'a, P> {
        VolumePassBuilder {
            label: label.to_string(),
            bind_groups: Default::default(),
            _params: Default::default(),
        }
    }

    pub fn run(
        &self,
        volume: &VolumeController,
        encoder: &mut wgpu::CommandEncoder,
        size: UVec3,
        params: P,
    ) {
        let label = format!("brume_{}_pass", self.label);

        let mut pass =
            encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some(&label),
            });

        pass.set_pipeline(&self.pipeline);

        if mem::size_of::<P>() > 0 {
            pass.set_push_constants(0, bytemuck::bytes_of(&params));
        }

        for (idx, bind_group) in self.bind_groups.iter().enumerate() {
            pass.set_bind_group(
                idx as u32,
                bind_group.get(volume.is_alternate()),
                &[],
            );
        }

        pass.dispatch_workgroups(size.x, size.y, size.z);
    }
}

pub struct VolumePassBuilder<'a, P> {
    label: String,
    bind_groups: Vec<Vec<&'a dyn DoubleBufferedBindable>>,
    _params: PhantomData<P>,
}

impl<'a, P> VolumePassBuilder<'a, P>
where
    P: Pod,
{
    /// Adds a descriptor set; `items` land at consecutive bindings, in
    /// order.
    pub fn bind<const N: usize>(
        mut self,
        items: [&'a dyn DoubleBufferedBindable; N],
    ) -> Self {
        self.bind_groups.push(items.to_vec());
        self
    }

    pub fn build(
        self,
        device: &wgpu::Device,
        module: &wgpu::ShaderModule,
    ) -> VolumeComputePass<P> {
        debug!("Initializing pass: {}", self.label);

        let bind_groups: Vec<_> = self
            .bind_groups
            .iter()
            .enumerate()
            .map(|(idx, items)| {
                BindGroupPair::new(
                    device,
                    &format!("brume_{}_bg{}", self.label, idx),
                    items,
                )
            })
            .collect();

        let bind_group_layouts: Vec<_> =
            bind_groups.iter().map(|bg| bg.layout()).collect();

        let push_constant_ranges = if mem::size_of::<P>() > 0 {
            vec![wgpu::PushConstantRange {
                stages: wgpu::ShaderStages::COMPUTE,
                range: Range {
                    start: 0,
                    end: mem::size_of::<P>() as u32,
                },
            }]
        } else {
            vec![]
        };

        let pipeline_layout_label =
            format!("brume_{}_pipeline_layout", self.label);

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&pipeline_layout_label),
                bind_group_layouts: &bind_group_layouts,
                push_constant_ranges: &push_constant_ranges,
            });

        let pipeline_label = format!("brume_{}_pipeline", self.label);
        let entry_point = shader_entry_point(&self.label);

        let pipeline =
            device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some(&pipeline_label),
                layout: Some(&pipeline_layout),
                module,
                entry_point: &entry_point,
            });

        VolumeComputePass {
            label: self.label,
            bind_groups,
            pipeline,
            _params: PhantomData,
        }
    }
}

/// Multimodule rust-gpu builds keep the module path in the entry-point name,
/// so `volume_integrate.spv` exports `volume_integrate::main`, not `main`.
fn shader_entry_point(label: &str) -> String {
    format!("{label}::main")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_point_carries_the_module_path() {
        assert_eq!(
            "volume_integrate::main",
            shader_entry_point("volume_integrate")
        );
    }
}
