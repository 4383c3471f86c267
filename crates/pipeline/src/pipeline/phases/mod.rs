// Generation phases, in run order.
//
// Every run initializes all three packages, forks the selected components,
// then always rebuilds the shared trees and every barrel before handing the
// output to the alias conversion script.

pub mod replicate;

#[path = "01_init.rs"]
pub mod init;
#[path = "02_components.rs"]
pub mod components;
#[path = "03_types.rs"]
pub mod types;
#[path = "04_utils.rs"]
pub mod utils;
#[path = "05_shared.rs"]
pub mod shared;
#[path = "06_index.rs"]
pub mod index;
#[path = "07_aliases.rs"]
pub mod aliases;
