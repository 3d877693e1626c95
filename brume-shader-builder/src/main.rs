use std::error::Error;
use std::fs;
use std::path::Path;

use spirv_builder::{MetadataPrintout, SpirvBuilder};

/// Compiles `brume-shaders` to SPIR-V, one module per entry point, and drops
/// the artifacts into `target/shaders/` where the host crate's runtime
/// loader expects them.
fn main() -> Result<(), Box<dyn Error>> {
    let workspace_path =
        Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap();

    let crate_path = workspace_path.join("brume-shaders");
    let out_path = workspace_path.join("target").join("shaders");

    let result = SpirvBuilder::new(crate_path, "spirv-unknown-spv1.3")
        .multimodule(true)
        .print_metadata(MetadataPrintout::None)
        .build()?;

    fs::create_dir_all(&out_path)?;

    for (shader_name, shader_path) in result.module.unwrap_multi() {
        let shader_id = shader_name.replace("::", "_");
        let shader_id = shader_id.strip_suffix("_main").unwrap_or(&shader_id);
        let target = out_path.join(shader_id).with_extension("spv");

        fs::copy(shader_path, &target)?;

        println!("{} -> {}", shader_name, target.display());
    }

    Ok(())
}
