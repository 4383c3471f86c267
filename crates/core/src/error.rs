use std::path::PathBuf;
use thiserror::Error;

/// Fatal generation failures. Everything recoverable (missing variant file,
/// missing shared directory, unknown component) is a warning instead.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Source root does not exist: {}", .0.display())]
    MissingSourceRoot(PathBuf),

    #[error("Template not found: {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("Refusing to write outside the output root: {}", .0.display())]
    OutsideOutputRoot(PathBuf),

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidExclude { pattern: String, message: String },
}
