//! Output formatting for generation reports, component listings and configuration
//!
//! JSON and YAML are meant for CI scripts; human text goes to a terminal.
//! Everything here is written to stdout, logs go to stderr.

use anyhow::{Context, Result};
use chillgen_core::{GenerationReport, GeneratorConfig};
use serde::Serialize;
use std::fmt::Write as _;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Debug, Serialize)]
struct ComponentListing<'a> {
    components: &'a [String],
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &GenerationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report to YAML")
            }
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    pub fn format_components(&self, components: &[String]) -> Result<String> {
        let listing = ComponentListing { components };
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&listing)
                .context("Failed to serialize component list to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&listing)
                .context("Failed to serialize component list to YAML"),
            OutputFormat::Human => Ok(self.format_components_human(components)),
        }
    }

    pub fn format_config(&self, config: &GeneratorConfig) -> Result<String> {
        let map = serde_json::json!({
            "project_root": config.project_root,
            "source_root": config.source_root,
            "output_root": config.output_root,
            "templates_dir": config.templates_dir,
            "alias_command": config.alias_command,
            "shared_dirs": config.shared_dirs,
            "exclude": config.exclude,
            "log_level": config.log_level,
        });
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&map).context("Failed to serialize config to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_report_human(&self, report: &GenerationReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Generated: {}", report.target);
        if !report.components.is_empty() {
            let _ = writeln!(out, "Components: {}", report.components.join(", "));
        }
        if !report.missing_components.is_empty() {
            let _ = writeln!(out, "Missing components: {}", report.missing_components.join(", "));
        }

        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<12} {:>6} {:>10} {:>8} {:>8} {:>12}  {}",
            "VARIANT", "FILES", "FALLBACKS", "ADOPTED", "MISSING", "OVERWRITTEN", "DIGEST"
        );
        for (variant, summary) in &report.variants {
            let digest = summary
                .digest
                .as_deref()
                .map(|d| &d[..d.len().min(12)])
                .unwrap_or("-");
            let _ = writeln!(
                out,
                "{:<12} {:>6} {:>10} {:>8} {:>8} {:>12}  {}",
                variant.to_string(),
                summary.files_written,
                summary.fallbacks,
                summary.adopted,
                summary.missing,
                summary.overwritten,
                digest
            );
        }

        if let Some(alias) = &report.alias_conversion {
            let status = if alias.success { "ok" } else { "failed" };
            let _ = writeln!(out);
            let _ = writeln!(out, "Alias conversion: {} ({})", status, alias.message);
        }

        if !report.warnings.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Warnings ({}):", report.warnings.len());
            for warning in &report.warnings {
                let _ = writeln!(out, "  - {}", warning);
            }
        }
        out
    }

    fn format_components_human(&self, components: &[String]) -> String {
        let mut out = String::new();
        if components.is_empty() {
            let _ = writeln!(out, "No components found.");
        } else {
            let _ = writeln!(out, "Available components:");
            for name in components {
                let _ = writeln!(out, "  {}", name);
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Usage:");
        let _ = writeln!(out, "  chillgen <component>   Generate one component for every variant");
        let _ = writeln!(out, "  chillgen all           Generate every component");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chillgen_core::{ProgressEvent, Variant};

    fn report() -> GenerationReport {
        let mut report = GenerationReport::new("avatar");
        report.record(&ProgressEvent::ComponentStarted {
            component: "avatar".to_string(),
            layout: "standard".to_string(),
        });
        report.record(&ProgressEvent::FileWritten {
            variant: Variant::Tailwind,
            path: "src/components/avatar/components/Avatar.tsx".to_string(),
        });
        report.record(&ProgressEvent::FileMissing {
            variant: Variant::Hybrid,
            logical: "Only.tsx".to_string(),
            context: "components/avatar/components".to_string(),
        });
        report.set_digest(Variant::Tailwind, "0123456789abcdef0123".to_string());
        report
    }

    #[test]
    fn test_report_json() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_report(&report())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["target"], "avatar");
        assert_eq!(value["variants"]["tailwind"]["files_written"], 1);
        assert_eq!(value["variants"]["hybrid"]["missing"], 1);
    }

    #[test]
    fn test_report_yaml() {
        let output = OutputFormatter::new(OutputFormat::Yaml)
            .format_report(&report())
            .unwrap();
        assert!(output.contains("target: avatar"));
        assert!(output.contains("tailwind:"));
    }

    #[test]
    fn test_report_human() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_report(&report())
            .unwrap();
        assert!(output.starts_with("Generated: avatar\n"));
        assert!(output.contains("Components: avatar"));
        assert!(output.contains("0123456789ab"));
        assert!(!output.contains("0123456789abc"));
        assert!(output.contains("Warnings (1):"));
    }

    #[test]
    fn test_components_human_includes_usage() {
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_components(&["accordion".to_string(), "avatar".to_string()])
            .unwrap();
        assert!(output.contains("  accordion\n  avatar\n"));
        assert!(output.contains("chillgen all"));
    }

    #[test]
    fn test_components_json() {
        let output = OutputFormatter::new(OutputFormat::Json)
            .format_components(&["avatar".to_string()])
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["components"][0], "avatar");
    }

    #[test]
    fn test_config_human_uses_display() {
        let config = GeneratorConfig::for_project("/project");
        let output = OutputFormatter::new(OutputFormat::Human)
            .format_config(&config)
            .unwrap();
        assert!(output.starts_with("Chillgen Configuration:"));
    }
}
