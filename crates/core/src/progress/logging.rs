//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, error, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { target } => {
                info!(run = %target, "Starting generation");
            }
            ProgressEvent::PackageInitialized { variant } => {
                debug!(variant = %variant, package = variant.dir_name(), "Package initialized");
            }
            ProgressEvent::PhaseStarted { phase } => {
                debug!(phase = %phase, "Starting phase");
            }
            ProgressEvent::PhaseComplete { phase, duration } => {
                info!(
                    phase = %phase,
                    duration_ms = duration.as_millis(),
                    "Phase complete"
                );
            }
            ProgressEvent::ComponentStarted { component, layout } => {
                info!(component = %component, layout = %layout, "Processing component");
            }
            ProgressEvent::ComponentMissing {
                component,
                suggestions,
            } => {
                if suggestions.is_empty() {
                    error!(component = %component, "Component not found");
                } else {
                    error!(
                        component = %component,
                        did_you_mean = %suggestions.join(", "),
                        "Component not found"
                    );
                }
            }
            ProgressEvent::FileWritten { variant, path } => {
                debug!(variant = %variant, path = %path, "Wrote file");
            }
            ProgressEvent::FallbackUsed {
                variant,
                logical,
                source,
            } => {
                info!(
                    variant = %variant,
                    file = %logical,
                    source = %source,
                    "No variant-specific file, using fallback"
                );
            }
            ProgressEvent::FileAdopted {
                variant,
                logical,
                source,
            } => {
                warn!(
                    variant = %variant,
                    file = %logical,
                    source = %source,
                    "No unsuffixed file, adopting variant-only file"
                );
            }
            ProgressEvent::FileMissing {
                variant,
                logical,
                context,
            } => {
                warn!(
                    variant = %variant,
                    file = %logical,
                    context = %context,
                    "No source file for variant, skipping"
                );
            }
            ProgressEvent::FileOverwritten { variant, path } => {
                warn!(variant = %variant, path = %path, "File written twice, later source wins");
            }
            ProgressEvent::SourceMissing { path } => {
                warn!(path = %path, "Source not found, skipping");
            }
            ProgressEvent::Warning { message } => {
                warn!("{}", message);
            }
            ProgressEvent::AliasConversion { success, message } => {
                if *success {
                    info!("Alias conversion complete");
                } else {
                    error!(error = %message, "Alias conversion failed");
                }
            }
            ProgressEvent::Completed { total_time } => {
                info!(total_time_ms = total_time.as_millis(), "Generation complete");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;
    use std::time::Duration;

    #[test]
    fn test_logging_all_events() {
        let handler = LoggingHandler;

        let events = vec![
            ProgressEvent::Started {
                target: "all".to_string(),
            },
            ProgressEvent::PackageInitialized {
                variant: Variant::Hybrid,
            },
            ProgressEvent::PhaseStarted {
                phase: "components".to_string(),
            },
            ProgressEvent::PhaseComplete {
                phase: "components".to_string(),
                duration: Duration::from_millis(12),
            },
            ProgressEvent::ComponentStarted {
                component: "avatar".to_string(),
                layout: "standard".to_string(),
            },
            ProgressEvent::ComponentMissing {
                component: "avatr".to_string(),
                suggestions: vec!["avatar".to_string()],
            },
            ProgressEvent::ComponentMissing {
                component: "zzz".to_string(),
                suggestions: vec![],
            },
            ProgressEvent::FileWritten {
                variant: Variant::Tailwind,
                path: "src/components/avatar/components/Avatar.tsx".to_string(),
            },
            ProgressEvent::FallbackUsed {
                variant: Variant::Stylesheet,
                logical: "Avatar.tsx".to_string(),
                source: "Avatar.tsx".to_string(),
            },
            ProgressEvent::FileAdopted {
                variant: Variant::Hybrid,
                logical: "chip.types.ts".to_string(),
                source: "chip.ss.types.ts".to_string(),
            },
            ProgressEvent::FileMissing {
                variant: Variant::Hybrid,
                logical: "Only.tsx".to_string(),
                context: "components/only".to_string(),
            },
            ProgressEvent::FileOverwritten {
                variant: Variant::Hybrid,
                path: "src/utils/cn.ts".to_string(),
            },
            ProgressEvent::SourceMissing {
                path: "types/avatar".to_string(),
            },
            ProgressEvent::Warning {
                message: "no export block for Avatar".to_string(),
            },
            ProgressEvent::AliasConversion {
                success: false,
                message: "exit status 1".to_string(),
            },
            ProgressEvent::Completed {
                total_time: Duration::from_secs(1),
            },
        ];

        for event in events {
            handler.on_progress(&event);
        }
    }
}
