//! Summary of one generation run

use crate::fs::FileSystem;
use crate::progress::ProgressEvent;
use crate::variant::Variant;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub files_written: usize,
    pub fallbacks: usize,
    pub adopted: usize,
    pub missing: usize,
    pub overwritten: usize,
    /// SHA-256 over the sorted relative paths and contents of the package tree
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasOutcome {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub target: String,
    pub components: Vec<String>,
    pub missing_components: Vec<String>,
    pub variants: BTreeMap<Variant, VariantSummary>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_conversion: Option<AliasOutcome>,
}

impl GenerationReport {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    /// Fold a progress event into the summary
    pub fn record(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { target } => {
                self.target = target.clone();
            }
            ProgressEvent::ComponentStarted { component, .. } => {
                if !self.components.contains(component) {
                    self.components.push(component.clone());
                }
            }
            ProgressEvent::ComponentMissing { component, .. } => {
                self.missing_components.push(component.clone());
                self.warnings
                    .push(format!("component '{}' not found", component));
            }
            ProgressEvent::FileWritten { variant, .. } => {
                self.summary_mut(*variant).files_written += 1;
            }
            ProgressEvent::FallbackUsed { variant, .. } => {
                self.summary_mut(*variant).fallbacks += 1;
            }
            ProgressEvent::FileAdopted {
                variant,
                logical,
                source,
            } => {
                self.summary_mut(*variant).adopted += 1;
                self.warnings.push(format!(
                    "{}: adopted {} as {}",
                    variant, source, logical
                ));
            }
            ProgressEvent::FileMissing {
                variant,
                logical,
                context,
            } => {
                self.summary_mut(*variant).missing += 1;
                self.warnings.push(format!(
                    "{}: no source for {} in {}",
                    variant, logical, context
                ));
            }
            ProgressEvent::FileOverwritten { variant, path } => {
                self.summary_mut(*variant).overwritten += 1;
                self.warnings
                    .push(format!("{}: {} written more than once", variant, path));
            }
            ProgressEvent::SourceMissing { path } => {
                self.warnings.push(format!("missing source {}", path));
            }
            ProgressEvent::Warning { message } => {
                self.warnings.push(message.clone());
            }
            ProgressEvent::AliasConversion { success, message } => {
                self.alias_conversion = Some(AliasOutcome {
                    success: *success,
                    message: message.clone(),
                });
            }
            ProgressEvent::PackageInitialized { variant } => {
                self.summary_mut(*variant);
            }
            ProgressEvent::PhaseStarted { .. }
            | ProgressEvent::PhaseComplete { .. }
            | ProgressEvent::Completed { .. } => {}
        }
    }

    pub fn set_digest(&mut self, variant: Variant, digest: String) {
        self.summary_mut(variant).digest = Some(digest);
    }

    pub fn summary(&self, variant: Variant) -> Option<&VariantSummary> {
        self.variants.get(&variant)
    }

    pub fn total_files(&self) -> usize {
        self.variants.values().map(|s| s.files_written).sum()
    }

    fn summary_mut(&mut self, variant: Variant) -> &mut VariantSummary {
        self.variants.entry(variant).or_default()
    }
}

/// Content digest of a generated tree; equal trees give equal digests
pub fn tree_digest(fs: &dyn FileSystem, root: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    for rel in fs.walk_files(root)? {
        let content = fs.read_to_string(&root.join(&rel))?;
        hasher.update(rel.to_string_lossy().replace('\\', "/").as_bytes());
        hasher.update([0u8]);
        hasher.update(content.as_bytes());
        hasher.update([0u8]);
    }
    Ok(hex::encode(hasher.finalize()))
}
