use chillgen_core::GeneratorConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Forks the shared chill-ui source tree into hybrid, stylesheet and tailwind packages
#[derive(Parser, Debug)]
#[command(
    name = "chillgen",
    about = "Generate the hybrid, stylesheet and tailwind chill-ui packages from the shared source tree",
    version,
    author,
    long_about = "chillgen copies each component of the shared source tree into three \
                  publishable packages, keeping the files authored for each styling \
                  variant and rewriting imports and type names so no variant suffix \
                  survives. Shared types, utils, constants and every barrel file are \
                  rebuilt on each run.\n\n\
                  Examples:\n  \
                  chillgen\n  \
                  chillgen avatar\n  \
                  chillgen all --clean\n  \
                  chillgen all --format json --skip-aliases"
)]
pub struct CliArgs {
    #[arg(
        value_name = "COMPONENT",
        help = "Component directory to generate, or 'all' (omit to list components)"
    )]
    pub component: Option<String>,

    #[arg(
        short = 'p',
        long,
        value_name = "DIR",
        help = "Project root (defaults to current directory)"
    )]
    pub project: Option<PathBuf>,

    #[arg(
        short = 'c',
        long,
        value_name = "FILE",
        help = "Config file (defaults to chillgen.toml in the project root)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Shared source tree, relative to the project root")]
    pub source: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory receiving the core-* packages")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory holding the package config templates")]
    pub templates: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Delete the generated packages entirely before regenerating")]
    pub clean: bool,

    #[arg(long, help = "Do not run the alias-to-relative-path conversion script")]
    pub skip_aliases: bool,

    #[arg(long, help = "Print the effective configuration and exit")]
    pub show_config: bool,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Verbose logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Flags override whatever the config file and environment set
    pub fn apply_overrides(&self, config: &mut GeneratorConfig) {
        if let Some(source) = &self.source {
            config.source_root = source.clone();
        }
        if let Some(output) = &self.output {
            config.output_root = output.clone();
        }
        if let Some(templates) = &self.templates {
            config.templates_dir = templates.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.to_lowercase();
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
