use super::replicate::{replicate_dir, replicate_files, replicate_styles};
use crate::filter::FallbackPolicy;
use crate::layout::{ComponentDescriptor, LayoutKind};
use crate::pipeline::context::{GenerationContext, Selection};
use crate::pipeline::phase_trait::GenerationPhase;
use anyhow::Result;
use chillgen_core::{ProgressEvent, Variant};
use std::path::Path;

/// Forks each selected component directory into the three packages
pub struct ComponentsPhase;

impl GenerationPhase for ComponentsPhase {
    fn name(&self) -> &'static str {
        "ComponentsPhase"
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<()> {
        let components = context.components.clone();

        for variant in Variant::ALL {
            let dest = context.config.package_src(variant).join("components");
            match context.options.selection {
                Selection::All => context.remove_output_dir(&dest)?,
                Selection::Component(_) => {
                    for component in &components {
                        context.remove_output_dir(&dest.join(&component.name))?;
                    }
                }
            }
        }

        for component in &components {
            context.emit(ProgressEvent::ComponentStarted {
                component: component.name.clone(),
                layout: component.layout.to_string(),
            });
            for variant in Variant::ALL {
                fork_component(context, component, variant)?;
            }
        }
        Ok(())
    }
}

fn fork_component(
    context: &mut GenerationContext,
    component: &ComponentDescriptor,
    variant: Variant,
) -> Result<()> {
    let dest = context
        .config
        .package_src(variant)
        .join("components")
        .join(&component.name);

    let mut loose_files = Vec::new();
    for entry in context.source_entries(&component.root)? {
        let target = dest.join(&entry.name);
        match (entry.is_dir(), entry.name.as_str()) {
            (true, "components") => fork_components_dir(context, component, &target, variant)?,
            (true, "styles") => replicate_styles(context, &entry.path, &target, variant)?,
            (true, _) => replicate_dir(
                context,
                &entry.path,
                &target,
                variant,
                FallbackPolicy::Component,
                None,
                false,
            )?,
            // synthesized by the index phase
            (false, "index.ts") => {}
            (false, _) => loose_files.push(entry.name),
        }
    }

    replicate_files(
        context,
        &component.root,
        &loose_files,
        &dest,
        variant,
        FallbackPolicy::Component,
        None,
    )
}

fn fork_components_dir(
    context: &mut GenerationContext,
    component: &ComponentDescriptor,
    destination: &Path,
    variant: Variant,
) -> Result<()> {
    replicate_dir(
        context,
        &component.components_dir(),
        destination,
        variant,
        FallbackPolicy::Component,
        None,
        component.layout == LayoutKind::Composite,
    )
}
