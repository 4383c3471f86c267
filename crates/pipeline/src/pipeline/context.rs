use crate::barrel::BarrelParser;
use crate::layout::ComponentDescriptor;
use crate::rewrite::Rewriter;
use anyhow::{Context, Result};
use chillgen_core::{
    DirEntry, ExcludeMatcher, FileSystem, GenerateError, GenerationReport, GeneratorConfig,
    ProgressEvent, ProgressHandler, Variant,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which components a run forks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Component(String),
}

impl Selection {
    /// `all` selects every component, anything else names one
    pub fn parse(arg: &str) -> Self {
        if arg == "all" {
            Selection::All
        } else {
            Selection::Component(arg.to_string())
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Selection::All => "all",
            Selection::Component(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub selection: Selection,
    /// Delete the package roots entirely before regenerating
    pub clean: bool,
    pub run_aliases: bool,
}

impl RunOptions {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            clean: false,
            run_aliases: true,
        }
    }
}

pub struct GenerationContext {
    pub config: GeneratorConfig,
    pub fs: Arc<dyn FileSystem>,
    pub rewriter: Rewriter,
    pub barrels: BarrelParser,
    pub exclude: ExcludeMatcher,
    pub options: RunOptions,
    /// Selected components that exist in the source tree
    pub components: Vec<ComponentDescriptor>,
    handler: Arc<dyn ProgressHandler>,
    report: GenerationReport,
    written: HashSet<PathBuf>,
}

impl GenerationContext {
    pub fn new(
        config: GeneratorConfig,
        fs: Arc<dyn FileSystem>,
        exclude: ExcludeMatcher,
        options: RunOptions,
        handler: Arc<dyn ProgressHandler>,
    ) -> Self {
        let report = GenerationReport::new(options.selection.target());
        Self {
            config,
            fs,
            rewriter: Rewriter::new(),
            barrels: BarrelParser::new(),
            exclude,
            options,
            components: Vec::new(),
            handler,
            report,
            written: HashSet::new(),
        }
    }

    pub fn emit(&mut self, event: ProgressEvent) {
        self.handler.on_progress(&event);
        self.report.record(&event);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.emit(ProgressEvent::Warning {
            message: message.into(),
        });
    }

    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    pub fn report_mut(&mut self) -> &mut GenerationReport {
        &mut self.report
    }

    pub fn into_report(self) -> GenerationReport {
        self.report
    }

    /// Source path relative to the source root, for messages
    pub fn source_label(&self, path: &Path) -> String {
        path.strip_prefix(self.config.source_dir())
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Directory listing without excluded entries
    pub fn source_entries(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let entries = self
            .fs
            .read_dir(dir)
            .with_context(|| format!("Failed to list {}", dir.display()))?;
        Ok(entries
            .into_iter()
            .filter(|e| !self.exclude.is_excluded(&e.path, e.is_dir()))
            .collect())
    }

    /// Write one generated file. A second write to the same path within a
    /// run replaces the first and is reported.
    pub fn write_output(
        &mut self,
        variant: Variant,
        destination: &Path,
        contents: &str,
    ) -> Result<()> {
        if !destination.starts_with(self.config.output_dir()) {
            return Err(GenerateError::OutsideOutputRoot(destination.to_path_buf()).into());
        }

        let relative = destination
            .strip_prefix(self.config.package_dir(variant))
            .unwrap_or(destination)
            .to_string_lossy()
            .replace('\\', "/");

        if !self.written.insert(destination.to_path_buf()) {
            self.emit(ProgressEvent::FileOverwritten {
                variant,
                path: relative.clone(),
            });
        }

        self.fs
            .write(destination, contents)
            .with_context(|| format!("Failed to write {}", destination.display()))?;
        self.emit(ProgressEvent::FileWritten {
            variant,
            path: relative,
        });
        Ok(())
    }

    /// Copy a source file for `variant`, running it through the rewriter
    pub fn copy_rewritten(
        &mut self,
        variant: Variant,
        source: &Path,
        destination: &Path,
    ) -> Result<()> {
        let text = self
            .fs
            .read_to_string(source)
            .with_context(|| format!("Failed to read {}", source.display()))?;
        let rewritten = self.rewriter.rewrite(&text, variant, destination);
        self.write_output(variant, destination, &rewritten)
    }

    /// Recursive copy that keeps file names and rewrites contents
    pub fn copy_tree(&mut self, variant: Variant, source: &Path, destination: &Path) -> Result<()> {
        for entry in self.source_entries(source)? {
            let target = destination.join(&entry.name);
            if entry.is_dir() {
                self.copy_tree(variant, &entry.path, &target)?;
            } else {
                self.copy_rewritten(variant, &entry.path, &target)?;
            }
        }
        Ok(())
    }

    pub fn remove_output_dir(&self, dir: &Path) -> Result<()> {
        self.fs
            .remove_dir_all(dir)
            .with_context(|| format!("Failed to remove {}", dir.display()))
    }
}
