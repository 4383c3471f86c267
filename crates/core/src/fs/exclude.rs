use crate::error::GenerateError;
use ignore::overrides::{Override, OverrideBuilder};
use std::path::Path;

/// Gitignore-style globs for source files that never reach a generated tree
pub struct ExcludeMatcher {
    overrides: Override,
}

impl ExcludeMatcher {
    pub fn new(source_root: &Path, patterns: &[String]) -> Result<Self, GenerateError> {
        let mut builder = OverrideBuilder::new(source_root);
        for pattern in patterns {
            builder
                .add(&format!("!{}", pattern))
                .map_err(|e| GenerateError::InvalidExclude {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
        }
        let overrides = builder.build().map_err(|e| GenerateError::InvalidExclude {
            pattern: patterns.join(", "),
            message: e.to_string(),
        })?;
        Ok(Self { overrides })
    }

    pub fn empty() -> Self {
        Self {
            overrides: Override::empty(),
        }
    }

    pub fn is_excluded(&self, path: &Path, is_dir: bool) -> bool {
        self.overrides.matched(path, is_dir).is_ignore()
    }
}
