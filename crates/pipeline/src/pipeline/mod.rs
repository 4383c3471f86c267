pub mod context;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;

pub use context::{GenerationContext, RunOptions, Selection};
pub use orchestrator::GenerationOrchestrator;
pub use phase_trait::GenerationPhase;
