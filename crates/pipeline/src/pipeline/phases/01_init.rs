use crate::pipeline::context::GenerationContext;
use crate::pipeline::phase_trait::GenerationPhase;
use crate::scaffold::scaffold_package;
use anyhow::{Context, Result};
use chillgen_core::{ProgressEvent, Variant};
use tracing::debug;

/// Creates the three package roots and writes their config files
pub struct InitPhase;

impl GenerationPhase for InitPhase {
    fn name(&self) -> &'static str {
        "InitPhase"
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<()> {
        let templates = context.config.templates_path();

        for variant in Variant::ALL {
            let package = context.config.package_dir(variant);
            if context.options.clean {
                debug!(variant = %variant, package = %package.display(), "Cleaning package root");
                context.remove_output_dir(&package)?;
            }

            let src = context.config.package_src(variant);
            context
                .fs
                .create_dir_all(&src)
                .with_context(|| format!("Failed to create {}", src.display()))?;

            let written = scaffold_package(context.fs.as_ref(), &templates, &package, variant)?;
            for path in written {
                context.emit(ProgressEvent::FileWritten { variant, path });
            }
            context.emit(ProgressEvent::PackageInitialized { variant });
        }
        Ok(())
    }
}
