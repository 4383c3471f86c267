use ignore::overrides::OverrideBuilder;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::variant::Variant;

const DEFAULT_SOURCE_ROOT: &str = "chill-ui-core/src";
const DEFAULT_OUTPUT_ROOT: &str = "generated";
const DEFAULT_TEMPLATES_DIR: &str = "scripts/templates";
const DEFAULT_ALIAS_COMMAND: &str = "node scripts/convert-aliases-to-relative.js";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_SHARED_DIRS: &[&str] = &["constants"];
const DEFAULT_EXCLUDES: &[&str] = &[
    "**/__tests__",
    "**/__tests__/**",
    "**/*.test.ts",
    "**/*.test.tsx",
    "**/*.stories.tsx",
];

/// File looked up in the project root when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "chillgen.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    #[error("Failed to read config file {path}: {error}")]
    ReadError { path: String, error: String },
}

/// Keys accepted in `chillgen.toml`; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    source_root: Option<PathBuf>,
    output_root: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
    alias_command: Option<String>,
    shared_dirs: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub project_root: PathBuf,
    pub source_root: PathBuf,
    pub output_root: PathBuf,
    pub templates_dir: PathBuf,
    pub alias_command: Vec<String>,
    pub shared_dirs: Vec<String>,
    pub exclude: Vec<String>,
    pub log_level: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let project_root = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::for_project(project_root)
    }
}

impl GeneratorConfig {
    /// Built-in defaults rooted at `project_root`, ignoring files and environment
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            alias_command: split_command(DEFAULT_ALIAS_COMMAND),
            shared_dirs: DEFAULT_SHARED_DIRS.iter().map(|s| s.to_string()).collect(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Defaults, then `config_file` (or `chillgen.toml` in the project root
    /// when present), then `CHILLGEN_*` environment variables.
    pub fn load(
        project_root: impl Into<PathBuf>,
        config_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::for_project(project_root);

        let file = match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = config.project_root.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        };
        if let Some(path) = file {
            config.apply_file(&path)?;
        }

        config.apply_env();
        Ok(config)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            field: path.display().to_string(),
            error: e.to_string(),
        })?;

        if let Some(v) = file.source_root {
            self.source_root = v;
        }
        if let Some(v) = file.output_root {
            self.output_root = v;
        }
        if let Some(v) = file.templates_dir {
            self.templates_dir = v;
        }
        if let Some(v) = file.alias_command {
            self.alias_command = split_command(&v);
        }
        if let Some(v) = file.shared_dirs {
            self.shared_dirs = v;
        }
        if let Some(v) = file.exclude {
            self.exclude = v;
        }
        if let Some(v) = file.log_level {
            self.log_level = v.to_lowercase();
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(v) = env::var("CHILLGEN_SOURCE_ROOT") {
            self.source_root = PathBuf::from(v);
        }
        if let Ok(v) = env::var("CHILLGEN_OUTPUT_ROOT") {
            self.output_root = PathBuf::from(v);
        }
        if let Ok(v) = env::var("CHILLGEN_TEMPLATES_DIR") {
            self.templates_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("CHILLGEN_ALIAS_COMMAND") {
            self.alias_command = split_command(&v);
        }
        if let Ok(v) = env::var("CHILLGEN_SHARED_DIRS") {
            self.shared_dirs = split_list(&v);
        }
        if let Ok(v) = env::var("CHILLGEN_LOG_LEVEL") {
            self.log_level = v.to_lowercase();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        if self.output_root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Output root must not be empty".to_string(),
            ));
        }

        let source = self.source_dir();
        let output = self.output_dir();
        if output.starts_with(&source) {
            return Err(ConfigError::ValidationFailed(format!(
                "Output root {} is inside the source root {}",
                output.display(),
                source.display()
            )));
        }
        if source.starts_with(&output) {
            return Err(ConfigError::ValidationFailed(format!(
                "Source root {} is inside the output root {} and would be deleted",
                source.display(),
                output.display()
            )));
        }

        let mut builder = OverrideBuilder::new(&source);
        for pattern in &self.exclude {
            builder.add(&format!("!{}", pattern)).map_err(|e| {
                ConfigError::ValidationFailed(format!(
                    "Invalid exclude pattern '{}': {}",
                    pattern, e
                ))
            })?;
        }

        for shared in &self.shared_dirs {
            if shared.is_empty() || shared.contains("..") || Path::new(shared).is_absolute() {
                return Err(ConfigError::ValidationFailed(format!(
                    "Shared directory must be a plain relative name: '{}'",
                    shared
                )));
            }
        }

        Ok(())
    }

    pub fn source_dir(&self) -> PathBuf {
        self.project_root.join(&self.source_root)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.project_root.join(&self.output_root)
    }

    pub fn templates_path(&self) -> PathBuf {
        self.project_root.join(&self.templates_dir)
    }

    /// Root of one generated package, e.g. `generated/core-tailwind`
    pub fn package_dir(&self, variant: Variant) -> PathBuf {
        self.output_dir().join(variant.dir_name())
    }

    /// `src/` of one generated package
    pub fn package_src(&self, variant: Variant) -> PathBuf {
        self.package_dir(variant).join("src")
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chillgen Configuration:")?;
        writeln!(f, "  Project Root: {}", self.project_root.display())?;
        writeln!(f, "  Source Root: {}", self.source_root.display())?;
        writeln!(f, "  Output Root: {}", self.output_root.display())?;
        writeln!(f, "  Templates: {}", self.templates_dir.display())?;
        if self.alias_command.is_empty() {
            writeln!(f, "  Alias Command: (disabled)")?;
        } else {
            writeln!(f, "  Alias Command: {}", self.alias_command.join(" "))?;
        }
        writeln!(f, "  Shared Dirs: {}", self.shared_dirs.join(", "))?;
        writeln!(f, "  Exclude: {}", self.exclude.join(", "))?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(|s| s.to_string()).collect()
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
