pub mod config;
pub mod error;
pub mod fs;
pub mod output;
pub mod progress;
pub mod variant;

pub use config::{ConfigError, GeneratorConfig};
pub use error::GenerateError;
pub use fs::{DirEntry, ExcludeMatcher, FileSystem, MockFileSystem, RealFileSystem};
pub use output::report::{tree_digest, GenerationReport, VariantSummary};
pub use progress::{LoggingHandler, NoOpHandler, ProgressEvent, ProgressHandler};
pub use variant::Variant;
