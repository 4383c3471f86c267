pub mod barrel;
pub mod filter;
pub mod layout;
pub mod naming;
pub mod pipeline;
pub mod rewrite;
pub mod scaffold;

pub use barrel::BarrelParser;
pub use filter::{FallbackPolicy, Resolution};
pub use layout::{ComponentDescriptor, LayoutKind};
pub use pipeline::orchestrator::suggest;
pub use pipeline::{
    GenerationContext, GenerationOrchestrator, GenerationPhase, RunOptions, Selection,
};
pub use rewrite::Rewriter;
