//! FileSystem abstraction for testable file operations

mod exclude;
mod mock;
mod real;
mod r#trait;

pub use exclude::ExcludeMatcher;
pub use mock::MockFileSystem;
pub use r#trait::{DirEntry, FileSystem, FileType};
pub use real::RealFileSystem;
