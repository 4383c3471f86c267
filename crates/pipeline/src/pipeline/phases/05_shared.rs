use crate::pipeline::context::GenerationContext;
use crate::pipeline::phase_trait::GenerationPhase;
use anyhow::Result;
use chillgen_core::{ProgressEvent, Variant};

/// Copies the shared directories (`constants/` by default) and the files at
/// the root of the source tree into every package
pub struct SharedPhase;

impl GenerationPhase for SharedPhase {
    fn name(&self) -> &'static str {
        "SharedPhase"
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<()> {
        let source_root = context.config.source_dir();

        for name in context.config.shared_dirs.clone() {
            let source = source_root.join(&name);
            for variant in Variant::ALL {
                let dest = context.config.package_src(variant).join(&name);
                context.remove_output_dir(&dest)?;
            }

            if !context.fs.is_dir(&source) {
                let label = context.source_label(&source);
                context.emit(ProgressEvent::SourceMissing { path: label });
                continue;
            }
            for variant in Variant::ALL {
                let dest = context.config.package_src(variant).join(&name);
                context.copy_tree(variant, &source, &dest)?;
            }
        }

        let root_files: Vec<_> = context
            .source_entries(&source_root)?
            .into_iter()
            .filter(|e| e.is_file() && e.name != "index.ts")
            .collect();
        for variant in Variant::ALL {
            let dest = context.config.package_src(variant);
            for file in &root_files {
                context.copy_rewritten(variant, &file.path, &dest.join(&file.name))?;
            }
        }
        Ok(())
    }
}
