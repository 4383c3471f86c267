use crate::pipeline::context::GenerationContext;
use crate::pipeline::phase_trait::GenerationPhase;
use anyhow::Result;
use chillgen_core::ProgressEvent;
use std::process::Command;
use tracing::debug;

/// Runs the external alias-to-relative-path conversion over the generated
/// packages. Its failure is reported, never propagated.
pub struct AliasesPhase;

impl GenerationPhase for AliasesPhase {
    fn name(&self) -> &'static str {
        "AliasesPhase"
    }

    fn execute(&self, context: &mut GenerationContext) -> Result<()> {
        if !context.options.run_aliases {
            debug!("Alias conversion skipped");
            return Ok(());
        }
        let Some((program, args)) = context.config.alias_command.split_first() else {
            debug!("No alias command configured");
            return Ok(());
        };

        debug!(command = %context.config.alias_command.join(" "), "Running alias conversion");
        let (success, message) = match Command::new(program)
            .args(args)
            .current_dir(&context.config.project_root)
            .output()
        {
            Ok(output) if output.status.success() => (true, format!("{} completed", program)),
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                (
                    false,
                    format!("{} exited with {}: {}", program, output.status, stderr.trim()),
                )
            }
            Err(e) => (false, format!("failed to run {}: {}", program, e)),
        };

        context.emit(ProgressEvent::AliasConversion { success, message });
        Ok(())
    }
}
