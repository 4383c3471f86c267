use chillgen_cli::cli::commands::CliArgs;
use chillgen_cli::cli::output::OutputFormatter;
use chillgen_cli::{NAME, VERSION};
use chillgen_core::{ConfigError, GeneratorConfig, RealFileSystem};
use chillgen_pipeline::{GenerationOrchestrator, RunOptions, Selection};

use clap::Parser;
use std::env;
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = run(&args);
    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let level = if let Some(level_str) = &args.log_level {
            parse_level(level_str)
        } else if args.verbose {
            Level::DEBUG
        } else if args.quiet {
            Level::ERROR
        } else {
            let level_str = env::var("CHILLGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            parse_level(&level_str)
        };

        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            if let Ok(directive) = format!("chillgen={}", level).parse() {
                filter = filter.add_directive(directive);
            }
        }

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    });
}

fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn load_config(args: &CliArgs) -> Result<GeneratorConfig, ConfigError> {
    let project_root = match &args.project {
        Some(path) => path.clone(),
        None => env::current_dir().map_err(|e| {
            ConfigError::ValidationFailed(format!("Failed to get current directory: {}", e))
        })?,
    };

    let mut config = GeneratorConfig::load(project_root, args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn run(args: &CliArgs) -> i32 {
    let config = match load_config(args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    debug!("Project root: {}", config.project_root.display());

    let formatter = OutputFormatter::new(args.format.into());

    if args.show_config {
        return print_output(formatter.format_config(&config));
    }

    let orchestrator = GenerationOrchestrator::new(Arc::new(RealFileSystem::new()));
    match &args.component {
        None => handle_list(&orchestrator, &config, &formatter),
        Some(target) => handle_generate(&orchestrator, &config, &formatter, args, target),
    }
}

fn handle_list(
    orchestrator: &GenerationOrchestrator,
    config: &GeneratorConfig,
    formatter: &OutputFormatter,
) -> i32 {
    match orchestrator.list_components(config) {
        Ok(components) => print_output(formatter.format_components(&components)),
        Err(e) => {
            error!("Failed to list components: {:#}", e);
            1
        }
    }
}

fn handle_generate(
    orchestrator: &GenerationOrchestrator,
    config: &GeneratorConfig,
    formatter: &OutputFormatter,
    args: &CliArgs,
    target: &str,
) -> i32 {
    let mut options = RunOptions::new(Selection::parse(target));
    options.clean = args.clean;
    options.run_aliases = !args.skip_aliases;

    match orchestrator.execute(config, options) {
        Ok(report) => {
            info!(
                files = report.total_files(),
                warnings = report.warnings.len(),
                "Generation finished"
            );
            print_output(formatter.format_report(&report))
        }
        Err(e) => {
            error!("Generation failed: {:#}", e);
            1
        }
    }
}

fn print_output(output: anyhow::Result<String>) -> i32 {
    match output {
        Ok(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            1
        }
    }
}
