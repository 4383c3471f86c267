//! Progress handler trait and events

use crate::variant::Variant;
use std::time::Duration;

/// Events emitted while generating the variant packages
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Generation started for a CLI target (`all` or a component name)
    Started { target: String },

    /// Package root created and its config files written
    PackageInitialized { variant: Variant },

    PhaseStarted { phase: String },

    PhaseComplete { phase: String, duration: Duration },

    /// A component directory is about to be forked
    ComponentStarted { component: String, layout: String },

    /// The requested component does not exist in the source tree
    ComponentMissing {
        component: String,
        suggestions: Vec<String>,
    },

    /// A generated file was written, path relative to the package root
    FileWritten { variant: Variant, path: String },

    /// No variant-specific source existed, the unsuffixed file was used
    FallbackUsed {
        variant: Variant,
        logical: String,
        source: String,
    },

    /// A file authored for another variant was adopted under the unsuffixed name
    FileAdopted {
        variant: Variant,
        logical: String,
        source: String,
    },

    /// Neither a variant-specific nor an unsuffixed source exists
    FileMissing {
        variant: Variant,
        logical: String,
        context: String,
    },

    /// A file was written twice in one run, the later source won
    FileOverwritten { variant: Variant, path: String },

    /// An optional source directory or file does not exist
    SourceMissing { path: String },

    /// Any other recoverable problem worth surfacing in the report
    Warning { message: String },

    /// Outcome of the external alias-to-relative-path conversion
    AliasConversion { success: bool, message: String },

    Completed { total_time: Duration },
}

/// Trait for handling progress events during generation
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
