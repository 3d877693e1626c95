use std::fs;
use std::path::Path;

use log::info;

/// Compute shader modules loaded from the `.spv` files produced by
/// `brume-shader-builder`.
///
/// The shaders are compiled offline (rust-gpu needs its own pinned nightly
/// toolchain), so this crate stays buildable on stable and just picks up the
/// artifacts at runtime.
#[derive(Debug)]
pub struct Shaders {
    pub volume_integrate: wgpu::ShaderModule,
    pub volume_preintegrate: wgpu::ShaderModule,
}

impl Shaders {
    pub fn new(device: &wgpu::Device, dir: &Path) -> Self {
        info!("Loading shaders from `{}`", dir.display());

        Self {
            volume_integrate: Self::load(device, dir, "volume_integrate"),
            volume_preintegrate: Self::load(device, dir, "volume_preintegrate"),
        }
    }

    fn load(device: &wgpu::Device, dir: &Path, name: &str) -> wgpu::ShaderModule {
        let path = dir.join(name).with_extension("spv");

        let bytes = fs::read(&path).unwrap_or_else(|err| {
            panic!(
                "couldn't load shader `{}` (did you run \
                 `cargo run -p brume-shader-builder` first?): {}",
                path.display(),
                err,
            )
        });

        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("brume_{name}")),
            source: wgpu::util::make_spirv(&bytes),
        })
    }
}
