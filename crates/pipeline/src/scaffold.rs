//! Package config files instantiated from templates

use anyhow::{Context, Result};
use chillgen_core::{FileSystem, GenerateError, Variant};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const TSCONFIG_TEMPLATE: &str = "tsconfig.template.json";
pub const BOB_TEMPLATE: &str = "bob.config.template.js";
pub const NATIVEWIND_ENV: &str = "nativewind-env.d.ts";
pub const CORE_NAME_PLACEHOLDER: &str = "{{CORE_NAME}}";

pub fn package_template(variant: Variant) -> String {
    format!("package.{}.template.json", variant.name())
}

/// Write `tsconfig.json`, `bob.config.js` and `package.json` (plus the
/// NativeWind env declaration for tailwind) into `package_dir`.
///
/// Returns the written file names, relative to `package_dir`.
pub fn scaffold_package(
    fs: &dyn FileSystem,
    templates_dir: &Path,
    package_dir: &Path,
    variant: Variant,
) -> Result<Vec<String>> {
    let mut outputs: Vec<(String, String)> = vec![
        (
            "tsconfig.json".to_string(),
            read_template(fs, &templates_dir.join(TSCONFIG_TEMPLATE))?,
        ),
        (
            "bob.config.js".to_string(),
            read_template(fs, &templates_dir.join(BOB_TEMPLATE))?
                .replace(CORE_NAME_PLACEHOLDER, variant.dir_name()),
        ),
        (
            "package.json".to_string(),
            read_template(fs, &templates_dir.join(package_template(variant)))?,
        ),
    ];
    if variant == Variant::Tailwind {
        outputs.push((
            NATIVEWIND_ENV.to_string(),
            read_template(fs, &templates_dir.join(NATIVEWIND_ENV))?,
        ));
    }

    let mut written = Vec::with_capacity(outputs.len());
    for (name, contents) in outputs {
        let target = package_dir.join(&name);
        fs.write(&target, &contents)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        debug!(variant = %variant, file = %name, "Config file written");
        written.push(name);
    }
    Ok(written)
}

fn read_template(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    if !fs.is_file(path) {
        return Err(GenerateError::MissingTemplate(PathBuf::from(path)).into());
    }
    fs.read_to_string(path)
        .with_context(|| format!("Failed to read template {}", path.display()))
}
