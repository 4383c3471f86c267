//! Component discovery and layout classification

use anyhow::{Context, Result};
use chillgen_core::{ExcludeMatcher, FileSystem};
use std::fmt;
use std::path::{Path, PathBuf};

/// How a component lays out its `components/` directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Flat files: `components/Avatar.tsx`, `components/Avatar.tw.tsx`
    Standard,
    /// One folder per sub-component: `components/item/item.tw.tsx`
    Composite,
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutKind::Standard => write!(f, "standard"),
            LayoutKind::Composite => write!(f, "composite"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    pub name: String,
    pub root: PathBuf,
    pub layout: LayoutKind,
    /// Sub-component folder names, composite layout only
    pub sub_components: Vec<String>,
}

impl ComponentDescriptor {
    pub fn components_dir(&self) -> PathBuf {
        self.root.join("components")
    }
}

/// Sorted names of the component directories under `components_root`
pub fn discover_components(fs: &dyn FileSystem, components_root: &Path) -> Result<Vec<String>> {
    if !fs.is_dir(components_root) {
        return Ok(Vec::new());
    }
    let names = fs
        .read_dir(components_root)
        .with_context(|| format!("Failed to list components in {}", components_root.display()))?
        .into_iter()
        .filter(|e| e.is_dir())
        .map(|e| e.name)
        .collect();
    Ok(names)
}

/// `Composite` when `components/` holds any sub-directory, `Standard` otherwise
/// (including a missing or empty `components/`).
pub fn classify(
    fs: &dyn FileSystem,
    component_root: &Path,
    exclude: &ExcludeMatcher,
) -> Result<LayoutKind> {
    Ok(if sub_directories(fs, component_root, exclude)?.is_empty() {
        LayoutKind::Standard
    } else {
        LayoutKind::Composite
    })
}

pub fn describe(
    fs: &dyn FileSystem,
    component_root: &Path,
    exclude: &ExcludeMatcher,
) -> Result<ComponentDescriptor> {
    let name = component_root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let layout = classify(fs, component_root, exclude)?;
    let sub_components = match layout {
        LayoutKind::Composite => sub_directories(fs, component_root, exclude)?,
        LayoutKind::Standard => Vec::new(),
    };

    Ok(ComponentDescriptor {
        name,
        root: component_root.to_path_buf(),
        layout,
        sub_components,
    })
}

fn sub_directories(
    fs: &dyn FileSystem,
    component_root: &Path,
    exclude: &ExcludeMatcher,
) -> Result<Vec<String>> {
    let dir = component_root.join("components");
    if !fs.is_dir(&dir) {
        return Ok(Vec::new());
    }
    Ok(fs
        .read_dir(&dir)?
        .into_iter()
        .filter(|e| e.is_dir() && !exclude.is_excluded(&e.path, true))
        .map(|e| e.name)
        .collect())
}
