use super::context::{GenerationContext, RunOptions, Selection};
use super::phase_trait::GenerationPhase;
use super::phases::{
    aliases::AliasesPhase, components::ComponentsPhase, index::IndexPhase, init::InitPhase,
    shared::SharedPhase, types::TypesPhase, utils::UtilsPhase,
};
use crate::layout::{describe, discover_components};
use anyhow::{Context, Result};
use chillgen_core::{
    tree_digest, ExcludeMatcher, FileSystem, GenerateError, GenerationReport, GeneratorConfig,
    LoggingHandler, ProgressEvent, ProgressHandler, Variant,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.8;
const MAX_SUGGESTIONS: usize = 3;

pub struct GenerationOrchestrator {
    fs: Arc<dyn FileSystem>,
    handler: Arc<dyn ProgressHandler>,
}

impl GenerationOrchestrator {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_handler(fs, Arc::new(LoggingHandler))
    }

    pub fn with_handler(fs: Arc<dyn FileSystem>, handler: Arc<dyn ProgressHandler>) -> Self {
        Self { fs, handler }
    }

    /// Sorted component directory names under `<source>/components`
    pub fn list_components(&self, config: &GeneratorConfig) -> Result<Vec<String>> {
        let source = config.source_dir();
        if !self.fs.is_dir(&source) {
            return Err(GenerateError::MissingSourceRoot(source).into());
        }
        let exclude = ExcludeMatcher::new(&source, &config.exclude)?;
        let root = source.join("components");
        Ok(discover_components(self.fs.as_ref(), &root)?
            .into_iter()
            .filter(|name| !exclude.is_excluded(&root.join(name), true))
            .collect())
    }

    pub fn execute(
        &self,
        config: &GeneratorConfig,
        options: RunOptions,
    ) -> Result<GenerationReport> {
        let start = Instant::now();
        let source = config.source_dir();
        if !self.fs.is_dir(&source) {
            return Err(GenerateError::MissingSourceRoot(source).into());
        }
        let exclude = ExcludeMatcher::new(&source, &config.exclude)?;

        info!(
            source = %source.display(),
            output = %config.output_dir().display(),
            "Starting generation pipeline"
        );

        let mut context = GenerationContext::new(
            config.clone(),
            self.fs.clone(),
            exclude,
            options,
            self.handler.clone(),
        );
        let target = context.options.selection.target().to_string();
        context.emit(ProgressEvent::Started { target });

        self.select_components(&mut context, config)?;

        let phases: Vec<Box<dyn GenerationPhase>> = vec![
            Box::new(InitPhase),
            Box::new(ComponentsPhase),
            Box::new(TypesPhase),
            Box::new(UtilsPhase),
            Box::new(SharedPhase),
            Box::new(IndexPhase),
            Box::new(AliasesPhase),
        ];

        for phase in phases {
            let phase_name = phase.name();
            context.emit(ProgressEvent::PhaseStarted {
                phase: phase_name.to_string(),
            });

            let phase_start = Instant::now();
            phase
                .execute(&mut context)
                .with_context(|| format!("Phase {} failed", phase_name))?;

            context.emit(ProgressEvent::PhaseComplete {
                phase: phase_name.to_string(),
                duration: phase_start.elapsed(),
            });
        }

        for variant in Variant::ALL {
            let package = config.package_dir(variant);
            if self.fs.is_dir(&package) {
                let digest = tree_digest(self.fs.as_ref(), &package)
                    .with_context(|| format!("Failed to digest {}", package.display()))?;
                context.report_mut().set_digest(variant, digest);
            }
        }

        context.emit(ProgressEvent::Completed {
            total_time: start.elapsed(),
        });
        Ok(context.into_report())
    }

    fn select_components(
        &self,
        context: &mut GenerationContext,
        config: &GeneratorConfig,
    ) -> Result<()> {
        let available = self.list_components(config)?;
        let root = config.source_dir().join("components");

        let selection = context.options.selection.clone();
        let names = match &selection {
            Selection::All => available,
            Selection::Component(name) if available.contains(name) => vec![name.clone()],
            Selection::Component(name) => {
                context.emit(ProgressEvent::ComponentMissing {
                    component: name.clone(),
                    suggestions: suggest(name, &available),
                });
                Vec::new()
            }
        };

        for name in names {
            let descriptor = describe(self.fs.as_ref(), &root.join(&name), &context.exclude)
                .with_context(|| format!("Failed to inspect component {}", name))?;
            context.components.push(descriptor);
        }
        Ok(())
    }
}

/// Closest existing names to `name`, best first
pub fn suggest(name: &str, candidates: &[String]) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = candidates
        .iter()
        .map(|c| (strsim::jaro_winkler(name, c), c))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, c)| c.clone())
        .collect()
}
