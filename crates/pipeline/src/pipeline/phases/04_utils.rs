use crate::pipeline::context::GenerationContext;
use crate::pipeline::phase_trait::GenerationPhase;
use anyhow::Result;
use chillgen_core::{ProgressEvent, Variant};

const VARIANT_DIRS: &[&str] = &["tw", "ss", "hybrid"];

/// Rebuilds `utils/` of every package.
///
/// `common/` and any other plain directory keep their place; the variant
/// directories a package receives are flattened into `utils/` itself, later
/// directories replacing files of earlier ones.
pub struct UtilsPhase;

impl GenerationPhase for UtilsPhase {
    fn name(&self) -> &'static str {
        "UtilsPhase"
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<()> {
        let source = context.config.source_dir().join("utils");

        for variant in Variant::ALL {
            let dest = context.config.package_src(variant).join("utils");
            context.remove_output_dir(&dest)?;
        }

        if !context.fs.is_dir(&source) {
            let label = context.source_label(&source);
            context.emit(ProgressEvent::SourceMissing { path: label });
            return Ok(());
        }

        let entries = context.source_entries(&source)?;
        for variant in Variant::ALL {
            let dest = context.config.package_src(variant).join("utils");

            for entry in &entries {
                if entry.is_dir() {
                    if !VARIANT_DIRS.contains(&entry.name.as_str()) {
                        context.copy_tree(variant, &entry.path, &dest.join(&entry.name))?;
                    }
                } else {
                    context.copy_rewritten(variant, &entry.path, &dest.join(&entry.name))?;
                }
            }

            for dir in variant.utils_dirs() {
                let variant_dir = source.join(dir);
                if context.fs.is_dir(&variant_dir) {
                    context.copy_tree(variant, &variant_dir, &dest)?;
                } else {
                    let label = context.source_label(&variant_dir);
                    context.emit(ProgressEvent::SourceMissing { path: label });
                }
            }
        }
        Ok(())
    }
}
