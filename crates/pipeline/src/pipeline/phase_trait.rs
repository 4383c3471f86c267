use super::context::GenerationContext;
use anyhow::Result;

/// One step of a generation run. Phases run in a fixed order and share the
/// context; an `Err` aborts the run.
pub trait GenerationPhase: Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(&self, context: &mut GenerationContext) -> Result<()>;
}
