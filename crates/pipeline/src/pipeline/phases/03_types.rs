use super::replicate::replicate_files;
use crate::filter::{group_by_logical, FallbackPolicy};
use crate::pipeline::context::{GenerationContext, Selection};
use crate::pipeline::phase_trait::GenerationPhase;
use anyhow::{Context, Result};
use chillgen_core::{ProgressEvent, Variant};
use tracing::debug;

/// Flattens `types/<name>/` of each selected component into `types/`.
///
/// Hybrid resolves type files tailwind-first and adopts a stylesheet-only
/// file as a last resort; the other variants never adopt.
pub struct TypesPhase;

impl GenerationPhase for TypesPhase {
    fn name(&self) -> &'static str {
        "TypesPhase"
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<()> {
        let source = context.config.source_dir().join("types");

        if context.options.selection == Selection::All {
            for variant in Variant::ALL {
                let dest = context.config.package_src(variant).join("types");
                context.remove_output_dir(&dest)?;
            }
        }

        if !context.fs.is_dir(&source) {
            let label = context.source_label(&source);
            context.emit(ProgressEvent::SourceMissing { path: label });
            return Ok(());
        }

        let entries = context.source_entries(&source)?;
        let root_files: Vec<String> = entries
            .iter()
            .filter(|e| e.is_file() && e.name != "index.ts")
            .map(|e| e.name.clone())
            .collect();
        let type_dirs: Vec<String> = match &context.options.selection {
            Selection::All => entries
                .iter()
                .filter(|e| e.is_dir())
                .map(|e| e.name.clone())
                .collect(),
            Selection::Component(_) => context.components.iter().map(|c| c.name.clone()).collect(),
        };

        for variant in Variant::ALL {
            let dest = context.config.package_src(variant).join("types");
            replicate_files(
                context,
                &source,
                &root_files,
                &dest,
                variant,
                FallbackPolicy::Types,
                None,
            )?;
        }

        for name in type_dirs {
            let dir = source.join(&name);
            if !context.fs.is_dir(&dir) {
                let label = context.source_label(&dir);
                context.emit(ProgressEvent::SourceMissing { path: label });
                continue;
            }

            let entries = context.source_entries(&dir)?;
            for nested in entries.iter().filter(|e| e.is_dir()) {
                debug!(path = %nested.path.display(), "Ignoring nested directory in types tree");
            }
            let files: Vec<String> = entries
                .iter()
                .filter(|e| e.is_file())
                .map(|e| e.name.clone())
                .collect();

            for variant in Variant::ALL {
                let dest = context.config.package_src(variant).join("types");
                if let Selection::Component(_) = context.options.selection {
                    // type files owned by this component, from a previous run
                    for group in group_by_logical(files.iter().map(String::as_str)) {
                        let stale = dest.join(&group.logical);
                        context
                            .fs
                            .remove_file(&stale)
                            .with_context(|| format!("Failed to remove {}", stale.display()))?;
                    }
                }
                replicate_files(
                    context,
                    &dir,
                    &files,
                    &dest,
                    variant,
                    FallbackPolicy::Types,
                    None,
                )?;
            }
        }
        Ok(())
    }
}
