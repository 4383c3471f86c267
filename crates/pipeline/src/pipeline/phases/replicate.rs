//! Variant-filtered copying shared by the component and types phases

use crate::filter::{group_by_logical, FallbackPolicy, Resolution};
use crate::naming::{pascal_case, SourceName};
use crate::pipeline::context::GenerationContext;
use anyhow::Result;
use chillgen_core::{ProgressEvent, Variant};
use std::path::Path;

/// Resolve `file_names` (all in `source_dir`) for `variant` and write each
/// winner to `destination` under its logical name.
///
/// With `primary` set to a sub-component folder name, the file whose stem
/// matches the folder is written as `<PascalFolder>.tsx`.
pub fn replicate_files(
    context: &mut GenerationContext,
    source_dir: &Path,
    file_names: &[String],
    destination: &Path,
    variant: Variant,
    policy: FallbackPolicy,
    primary: Option<&str>,
) -> Result<()> {
    for group in group_by_logical(file_names.iter().map(String::as_str)) {
        let target = match primary {
            Some(folder) if is_primary(&group.logical, folder) => {
                format!("{}.tsx", pascal_case(folder))
            }
            _ => group.logical.clone(),
        };

        let resolution = group.resolve(variant, policy);
        match &resolution {
            Resolution::Preferred(_) => {}
            Resolution::Fallback(source) => context.emit(ProgressEvent::FallbackUsed {
                variant,
                logical: target.clone(),
                source: source.clone(),
            }),
            Resolution::Adopted(source) => context.emit(ProgressEvent::FileAdopted {
                variant,
                logical: target.clone(),
                source: source.clone(),
            }),
            Resolution::Missing => {
                let label = context.source_label(source_dir);
                context.emit(ProgressEvent::FileMissing {
                    variant,
                    logical: target,
                    context: label,
                });
                continue;
            }
        }

        if let Some(source) = resolution.source() {
            context.copy_rewritten(variant, &source_dir.join(source), &destination.join(&target))?;
        }
    }
    Ok(())
}

/// Files of `source_dir` go through the variant filter, sub-directories are
/// replicated recursively. `composite` marks a directory whose children are
/// sub-component folders.
pub fn replicate_dir(
    context: &mut GenerationContext,
    source_dir: &Path,
    destination: &Path,
    variant: Variant,
    policy: FallbackPolicy,
    primary: Option<&str>,
    composite: bool,
) -> Result<()> {
    let entries = context.source_entries(source_dir)?;
    let files: Vec<String> = entries
        .iter()
        .filter(|e| e.is_file())
        .map(|e| e.name.clone())
        .collect();
    replicate_files(context, source_dir, &files, destination, variant, policy, primary)?;

    for dir in entries.iter().filter(|e| e.is_dir()) {
        let primary = if composite { Some(dir.name.as_str()) } else { None };
        replicate_dir(
            context,
            &dir.path,
            &destination.join(&dir.name),
            variant,
            policy,
            primary,
            false,
        )?;
    }
    Ok(())
}

/// Copy the style files `variant` includes, keeping the tree shape
pub fn replicate_styles(
    context: &mut GenerationContext,
    source_dir: &Path,
    destination: &Path,
    variant: Variant,
) -> Result<()> {
    for entry in context.source_entries(source_dir)? {
        if entry.is_dir() {
            replicate_styles(context, &entry.path, &destination.join(&entry.name), variant)?;
        } else if variant.includes_style_file(&entry.name) {
            let logical = SourceName::parse(&entry.name).logical;
            context.copy_rewritten(variant, &entry.path, &destination.join(logical))?;
        }
    }
    Ok(())
}

fn is_primary(logical: &str, folder: &str) -> bool {
    let name = SourceName::parse(logical);
    name.extension() == ".tsx" && name.stem().eq_ignore_ascii_case(&pascal_case(folder))
}
