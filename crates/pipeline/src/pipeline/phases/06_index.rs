use crate::barrel::{
    components_barrel, find_export_block, root_barrel, synthesize_component_barrel, types_barrel,
};
use crate::layout::{ComponentDescriptor, LayoutKind};
use crate::naming::pascal_case;
use crate::pipeline::context::GenerationContext;
use crate::pipeline::phase_trait::GenerationPhase;
use anyhow::{Context, Result};
use chillgen_core::{ProgressEvent, Variant};
use std::path::Path;

/// Writes the per-component barrels of the forked components, then the
/// `components/`, `types/` and root barrels of every package
pub struct IndexPhase;

impl GenerationPhase for IndexPhase {
    fn name(&self) -> &'static str {
        "IndexPhase"
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<()> {
        let components = context.components.clone();
        for component in &components {
            write_component_barrels(context, component)?;
        }

        for variant in Variant::ALL {
            write_package_barrels(context, variant)?;
        }
        Ok(())
    }
}

fn write_component_barrels(
    context: &mut GenerationContext,
    component: &ComponentDescriptor,
) -> Result<()> {
    let index = component.root.join("index.ts");
    if !context.fs.is_file(&index) {
        let label = context.source_label(&index);
        context.emit(ProgressEvent::SourceMissing { path: label });
        return Ok(());
    }
    let source = context
        .fs
        .read_to_string(&index)
        .with_context(|| format!("Failed to read {}", index.display()))?;

    let shared_block = match component.layout {
        LayoutKind::Standard => {
            let base = pascal_case(&component.name);
            let block = find_export_block(&context.barrels, &source, &base);
            if block.is_none() {
                let label = context.source_label(&index);
                context.warn(format!(
                    "{}: no export block for {}, filtering the barrel per variant",
                    label, base
                ));
            }
            block
        }
        LayoutKind::Composite => None,
    };

    for variant in Variant::ALL {
        let contents = match &shared_block {
            Some(block) => format!("{}\n", block),
            None => {
                synthesize_component_barrel(&context.barrels, &context.rewriter, &source, variant)
            }
        };
        let target = context
            .config
            .package_src(variant)
            .join("components")
            .join(&component.name)
            .join("index.ts");
        context.write_output(variant, &target, &contents)?;
    }
    Ok(())
}

fn write_package_barrels(context: &mut GenerationContext, variant: Variant) -> Result<()> {
    let src = context.config.package_src(variant);

    let components_dir = src.join("components");
    let has_components = context.fs.is_dir(&components_dir);
    if has_components {
        let names = child_names(context, &components_dir, true)?;
        let barrel = components_barrel(&names);
        context.write_output(variant, &components_dir.join("index.ts"), &barrel)?;
    }

    let types_dir = src.join("types");
    let has_types = context.fs.is_dir(&types_dir);
    if has_types {
        let files = child_names(context, &types_dir, false)?;
        context.write_output(variant, &types_dir.join("index.ts"), &types_barrel(&files))?;
    }

    let has_utils = context.fs.is_dir(&src.join("utils"));
    context.write_output(
        variant,
        &src.join("index.ts"),
        &root_barrel(has_components, has_types, has_utils),
    )
}

fn child_names(context: &GenerationContext, dir: &Path, dirs: bool) -> Result<Vec<String>> {
    Ok(context
        .fs
        .read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .into_iter()
        .filter(|e| e.is_dir() == dirs)
        .map(|e| e.name)
        .collect())
}
